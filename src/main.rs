use clap::Parser;
use form_check::cli::commands::{cmd_cases, cmd_person, cmd_validate};
use form_check::cli::config::{Cli, Commands, resolve_settings};
use form_check::trace::subscriber::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Cases { field, seed, format } => {
            cmd_cases(*field, *seed, format)?;
        }
        Commands::Person { seed, count } => {
            cmd_person(*seed, *count)?;
        }
        Commands::Validate {
            field,
            case,
            seed,
            person_seed,
        } => {
            // CLI > config file > defaults
            let settings = resolve_settings(&cli)?;

            let all_passed = cmd_validate(&settings, *field, case.as_deref(), *seed, *person_seed)?;
            if !all_passed {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
