mod render;
mod shell;

use ansi_term::Colour::{Fixed, Green, Yellow};
use clap::{Parser, Subcommand};
use evrima_rcon_client::r#async::Client;
use evrima_rcon_client::{ClientConfig, DEFAULT_PORT};
use log::{debug, error, LevelFilter};
use rpassword::read_password;
use shell::Shell;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::io::Write;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Address of the Evrima server, e.g. `127.0.0.1:8888`. The port defaults to 8888.
    address: String,

    /// RCON password. Prompted for when not set.
    #[clap(long, env = "EVRIMA_RCON_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Seconds to wait when connecting, and for more data while reading a reply.
    #[clap(long, default_value_t = 5)]
    timeout: u64,

    /// Read shell commands line by line from stdin, even in a terminal.
    #[clap(long)]
    no_interactive: bool,

    /// Log more detail. Repeat for protocol traces.
    #[clap(short, long, parse(from_occurrences))]
    verbose: u64,

    /// Command to run. Starts a shell when omitted.
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Show the server configuration
    Details,
    /// Broadcast a message to every player
    Announce {
        #[clap(required = true)]
        message: Vec<String>,
    },
    /// Remove every corpse on the map
    WipeCorpses,
    /// List connected players
    Players,
    /// Show live telemetry for connected players
    PlayerData,
    /// Replace the list of playable classes
    Playables {
        #[clap(required = true)]
        classes: Vec<String>,
    },
    /// Toggle human players on or off
    ToggleHumans,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ! {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(err) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("Could not set up logging: {}", err);
    }

    let (host, port) = parse_address(&args.address);

    let password = match args.password {
        Some(password) => password,
        None => {
            print!("{}:{}'s password: ", host, port);
            let _ = std::io::stdout().flush();
            match read_password() {
                Ok(password) => password,
                Err(err) => {
                    error!("Could not read password: {}", err);
                    proc_exit::Code::UNKNOWN.process_exit();
                }
            }
        }
    };

    let config = ClientConfig::new(host, port, password)
        .with_timeout(Duration::from_secs(args.timeout));
    debug!("Using {:?} timeout", config.timeout());
    let client = Client::with_config(config);

    match args.command {
        Some(command) => {
            let mut stdout = std::io::stdout();
            match run(&client, command).await {
                Ok(output) => {
                    let _ = writeln!(stdout, "{}", output);
                    proc_exit::Code::SUCCESS.process_exit()
                }
                Err(err) => {
                    error!("{}", err);
                    proc_exit::Code::UNKNOWN.process_exit()
                }
            }
        }
        None => shell_loop(client, args.no_interactive).await,
    }
}

/// Splits `host[:port]`, falling back to the default RCON port.
fn parse_address(address: &str) -> (String, u16) {
    if let Ok(socket_addr) = address.parse::<SocketAddr>() {
        return (socket_addr.ip().to_string(), socket_addr.port());
    }

    match address.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') => match port.parse() {
            Ok(port) => (host.to_string(), port),
            Err(_) => (address.to_string(), DEFAULT_PORT),
        },
        _ => (address.trim_matches(|c| c == '[' || c == ']').to_string(), DEFAULT_PORT),
    }
}

async fn run(client: &Client, command: Command) -> evrima_rcon_client::Result<String> {
    Ok(match command {
        Command::Details => render::server_details(&client.get_server_details().await?),
        Command::Announce { message } => {
            render::announcement(&client.send_announcement(&message.join(" ")).await?)
        }
        Command::WipeCorpses => render::wipe_corpses(&client.wipe_corpses().await?),
        Command::Players => render::players(&client.get_players().await?),
        Command::PlayerData => render::player_data(&client.get_player_data().await?),
        Command::Playables { classes } => {
            render::playables_update(&client.update_playables(&classes).await?)
        }
        Command::ToggleHumans => render::toggle_humans(&client.toggle_humans().await?),
    })
}

async fn shell_loop(client: Client, piped: bool) -> ! {
    let config = client.config();
    let prompt = format!(
        "{}> ",
        Fixed(10).paint(format!("{}:{}", config.host, config.port))
    );
    let mut shell = Shell::open(prompt, piped);

    shell.print(&format!(
        "{} {}. Type `help` for commands, `exit` to quit.",
        Green.paint(env!("CARGO_PKG_NAME")),
        env!("CARGO_PKG_VERSION")
    ));

    while let Some(command) = shell.next_command().await {
        match run(&client, command).await {
            Ok(output) => shell.print(&output),
            Err(err) => shell.print_error(&format!("{} {}", Yellow.paint("error:"), err)),
        }
    }

    proc_exit::Code::SUCCESS.process_exit()
}
