use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::error;

use finplan::api::{FireArgs, GrowthArgs, LoanArgs, RetirementArgs, ValidationError};
use finplan::core::{
    build_amortization_schedule, plan_retirement, project_fire, simulate_compound_growth,
};

#[derive(Parser, Debug)]
#[command(
    name = "finplan",
    version,
    about = "Personal finance projections: compound growth, loans, retirement and FIRE"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON API over HTTP.
    Serve {
        #[arg(long, env = "FINPLAN_PORT", default_value_t = 8080)]
        port: u16,
        #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
        host: IpAddr,
    },
    /// Month-by-month compound growth of a balance with recurring deposits.
    Growth(GrowthArgs),
    /// PRICE or SAC amortization schedule.
    Loan(LoanArgs),
    /// Accumulation and drawdown plan up to life expectancy.
    Retirement(RetirementArgs),
    /// Months until investments cover expenses at a withdrawal rate.
    Fire(FireArgs),
}

#[tokio::main]
async fn main() {
    finplan::logging::init();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Command::Serve { port, host } => {
            let addr = SocketAddr::new(host, port);
            if let Err(e) = finplan::api::run_http_server(addr).await {
                error!(%addr, "server error: {e}");
                std::process::exit(1);
            }
            return;
        }
        Command::Growth(args) => args
            .into_inputs()
            .map(|inputs| render(&simulate_compound_growth(&inputs))),
        Command::Loan(args) => args
            .into_inputs()
            .map(|inputs| render(&build_amortization_schedule(&inputs))),
        Command::Retirement(args) => args
            .into_inputs()
            .map(|inputs| render(&plan_retirement(&inputs))),
        Command::Fire(args) => args
            .into_inputs()
            .map(|inputs| render(&project_fire(&inputs))),
    };

    if let Err(e) = outcome {
        report_invalid(e);
    }
}

fn render<T: Serialize>(result: &T) {
    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!("failed to serialize result: {e}");
            std::process::exit(1);
        }
    }
}

fn report_invalid(e: ValidationError) -> ! {
    error!("{e}");
    std::process::exit(2);
}
