use std::{env, env::VarError};

/// There's no real CLI for the server, so just do quick 'n dirty
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        // We don't expect any CLI args, so always print the help
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // Credentials are deliberately left off this list
    const DISPLAY_ENVS: [&str; 12] = [
        "RUST_LOG",
        "MRS_HOST",
        "MRS_PORT",
        "MRS_DATABASE_URL",
        "MRS_DATABASE_POOL_SIZE",
        "MRS_AUTO_CONFIRM_SUBSCRIPTIONS",
        "MRS_GAMELIFT_REGION",
        "MRS_GAMELIFT_ENDPOINT",
        "MRS_GAMELIFT_FLEET_ID",
        "MRS_GAMELIFT_LOCATION",
        "MRS_GAMELIFT_QUEUE_NAME",
        "MRS_GAMELIFT_MAX_PLAYERS",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}
