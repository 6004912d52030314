use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use hotel_desk::menu::GREETING;
use hotel_desk::{Console, CredentialStore, DatabaseConnection, Session, Settings};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hotel-desk")]
#[command(about = "A menu-driven client for the hotel chain database", long_about = None)]
struct Cli {
    /// Name of the database to connect to
    #[arg(required_unless_present = "completions")]
    dbname: Option<String>,
    /// Port the PostgreSQL server listens on
    #[arg(required_unless_present = "completions")]
    port: Option<u16>,
    /// User to log in as
    #[arg(required_unless_present = "completions")]
    user: Option<String>,
    /// Server host, overriding the settings file
    #[arg(long)]
    host: Option<String>,
    /// Settings file to read instead of ~/.hotel-desk/settings.json
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,
    /// Ask for the password and store it encrypted for this login (the
    /// password is echoed as you type it)
    #[arg(long, conflicts_with = "forget_password")]
    save_password: bool,
    /// Remove the stored password for this login
    #[arg(long)]
    forget_password: bool,
    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL", conflicts_with_all = ["dbname", "port", "user"])]
    completions: Option<Shell>,
}

/// The database to connect to, as given on the command line.
struct Target {
    dbname: String,
    port: u16,
    user: String,
}

impl Cli {
    /// `None` exactly when `--completions` was given: clap requires all
    /// three positionals otherwise and rejects them alongside it.
    fn target(&self) -> Option<Target> {
        Some(Target {
            dbname: self.dbname.clone()?,
            port: self.port?,
            user: self.user.clone()?,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(Target { dbname, port, user }) = cli.target() else {
        if let Some(shell) = cli.completions {
            generate_completions(shell);
        }
        return Ok(());
    };

    let settings = Settings::load(cli.settings.as_deref())?;
    init_tracing(&settings.log_filter);

    let host = cli.host.clone().unwrap_or_else(|| settings.host.clone());
    let login = CredentialStore::key_for(&user, &host, port, &dbname);
    let password = resolve_password(&cli, &settings, &login)?;

    println!("{}", GREETING);
    print!("Connecting to database...");
    println!("Connection URL: postgresql://{}:{}/{}\n", host, port, dbname);

    let connection = match DatabaseConnection::connect(
        &host,
        port,
        &dbname,
        &user,
        &password,
        settings.connect_timeout(),
    )
    .await
    {
        Ok(connection) => connection,
        Err(e) => {
            eprintln!("Error - {}", e);
            println!("Make sure you started postgres on this machine");
            std::process::exit(-1);
        }
    };
    println!("Done");

    let console = Console::new(io::stdin().lock(), io::stdout(), io::stderr());
    let mut session =
        Session::new(connection, console).with_echo_statements(settings.echo_statements);
    session.run().await?;

    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// Password precedence: freshly saved, then settings or environment, then
// the credential store, then empty.
fn resolve_password(cli: &Cli, settings: &Settings, login: &str) -> Result<String> {
    if !cli.save_password && !cli.forget_password {
        if let Some(password) = &settings.password {
            return Ok(password.clone());
        }
    }

    let mut store = CredentialStore::open(Settings::config_dir())?;

    if cli.forget_password {
        if store.forget(login) {
            store.save()?;
            println!("Stored password for {} removed.", login);
        } else {
            println!("No stored password for {}.", login);
        }
    }

    if cli.save_password {
        print!("Password for {}: ", login);
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        let password = line.trim_end_matches(['\n', '\r']).to_string();
        store.remember(login, &password)?;
        store.save()?;
        tracing::info!(%login, "password stored");
        return Ok(password);
    }

    if let Some(password) = &settings.password {
        return Ok(password.clone());
    }

    match store.password(login) {
        Ok(password) => Ok(password.unwrap_or_default()),
        Err(e) => {
            tracing::warn!(%login, error = %e, "ignoring unreadable stored password");
            Ok(String::new())
        }
    }
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
