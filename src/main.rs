use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;

mod aws;
mod commands;
mod config;
mod display;
mod error;
mod logging;

use aws::stacks::StackParameter;
use commands::CreateArgs;
use error::StackitError;

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "stackit")]
#[command(about = "Stack Kit (stackit) - One-shot AWS CloudFormation stack provisioning for operators")]
#[command(
    long_about = "stackit reads credentials from a KEY=VALUE configuration file (or the default AWS credential chain) and issues a single CreateStack call from a local template.\n\nUsage: stackit [GLOBAL_OPTIONS] <COMMAND> [COMMAND_OPTIONS]\nExample: stackit create test --template-file ./asg_test.yaml --config ./stackit.conf"
)]
#[command(version = env!("STACKIT_VERSION"))]
struct Cli {
    #[arg(
        short = 'o',
        long = "format",
        value_enum,
        default_value = "text",
        help = "Output format: text or json (global option)"
    )]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Create a CloudFormation stack from a local template file")]
    Create {
        #[arg(help = "Name of the stack to create")]
        name: String,

        #[arg(
            short = 't',
            long = "template-file",
            help = "Path to the stack template; its contents are sent verbatim as the template body"
        )]
        template_file: PathBuf,

        #[arg(
            short = 'c',
            long,
            help = "Path to a KEY=VALUE configuration file with explicit AWS credentials; omit to use the default credential chain"
        )]
        config: Option<PathBuf>,

        #[arg(
            short = 'P',
            long = "param",
            value_name = "KEY=VALUE",
            help = "Template parameter (repeatable); a built-in default set is used when omitted"
        )]
        params: Vec<StackParameter>,

        #[arg(
            long,
            default_value_t = true,
            action = clap::ArgAction::Set,
            value_name = "BOOL",
            help = "Leave partially created resources in place instead of rolling back on failure"
        )]
        disable_rollback: bool,

        #[arg(
            long = "timeout",
            default_value_t = 2,
            value_name = "MINUTES",
            help = "Minutes CloudFormation waits for the stack before declaring failure"
        )]
        timeout_in_minutes: i32,
    },
}

#[tokio::main]
async fn main() {
    logging::init_logging();

    let cli = Cli::parse();
    let format = cli.format;

    let result: Result<(), StackitError> = match cli.command {
        Commands::Create {
            name,
            template_file,
            config,
            params,
            disable_rollback,
            timeout_in_minutes,
        } => {
            commands::create(
                CreateArgs {
                    name,
                    template_file,
                    config,
                    parameters: params,
                    disable_rollback,
                    timeout_in_minutes,
                },
                &format,
            )
            .await
        }
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        process::exit(1);
    }
}
