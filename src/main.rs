use clap::Parser;
use skin_compiler::{build, handle_pipe_command, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compile(args) => match build(args) {
            Ok(result) => {
                println!("Compilation successful!");
                println!("  - Compiled {} skins", result.files_compiled);
                println!("  - Wrote {} files", result.files_written.len());
                for warning in &result.warnings {
                    eprintln!("warning: {}", warning);
                }
                if !result.failures.is_empty() {
                    for (path, message) in &result.failures {
                        eprintln!("error: {}: {}", path.display(), message);
                    }
                    std::process::exit(1);
                }
                Ok(())
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Pipe(args) => {
            handle_pipe_command(args).await?;
            Ok(())
        }
    }
}
