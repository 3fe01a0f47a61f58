//! tradefloor: terminal client for the tradefloor stock-trading party game
//! Follows a game's rounds with a server-synchronized countdown.

use anyhow::Result;
use clap::{Arg, ArgMatches, Command as ClapCommand};
use std::path::PathBuf;

use tradefloor::commands::{handle_status_command, handle_watch_command, StatusArgs, WatchArgs};
use tradefloor::telemetry;

fn game_arg() -> Arg {
    Arg::new("game")
        .long("game")
        .short('g')
        .value_name("ID")
        .required(true)
        .help("Game session id")
}

fn server_arg() -> Arg {
    Arg::new("server")
        .long("server")
        .short('s')
        .value_name("URL")
        .global(true)
        .help("Game server base URL (overrides TRADEFLOOR_SERVER and the settings file)")
}

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .value_name("PATH")
        .global(true)
        .value_parser(clap::value_parser!(PathBuf))
        .help("Settings file (defaults to the per-user config.toml)")
}

fn build_cli() -> ClapCommand {
    ClapCommand::new("tradefloor")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Terminal client for the tradefloor stock-trading party game")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(server_arg())
        .arg(config_arg())
        .subcommand(
            ClapCommand::new("watch")
                .about("Follow a game round by round until it ends")
                .arg(game_arg())
                .arg(
                    Arg::new("final-round")
                        .long("final-round")
                        .value_name("N")
                        .value_parser(clap::value_parser!(u32).range(1..))
                        .help("Round whose end finishes the game"),
                )
                .arg(
                    Arg::new("no-store")
                        .long("no-store")
                        .help("Do not read or record the last seen round on disk")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            ClapCommand::new("status")
                .about("Print a game's current round and time left")
                .arg(game_arg()),
        )
}

fn common_args(matches: &ArgMatches) -> (String, Option<String>, Option<PathBuf>) {
    let game_id = matches
        .get_one::<String>("game")
        .cloned()
        .unwrap_or_default();
    let server = matches.get_one::<String>("server").cloned();
    let config = matches.get_one::<PathBuf>("config").cloned();
    (game_id, server, config)
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("watch", sub)) => {
            let (game_id, server, config) = common_args(sub);
            handle_watch_command(WatchArgs {
                game_id,
                server,
                config,
                final_round: sub.get_one::<u32>("final-round").copied(),
                no_store: sub.get_flag("no-store"),
            })
            .await
        }
        Some(("status", sub)) => {
            let (game_id, server, config) = common_args(sub);
            handle_status_command(StatusArgs {
                game_id,
                server,
                config,
            })
            .await
        }
        _ => Ok(()),
    }
}
