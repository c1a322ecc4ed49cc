//! skill-packager - package the Swift concurrency migration guide as a skill.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use skill_packager::cli::{Checkout, Cli, execute, print_report};
use skill_packager::config::PackagerConfig;
use skill_packager::logging::TracingLog;
use skill_packager::packager::{BuildOptions, BuildReport};
use skill_packager::source::{CloneWorkspace, GitCloneSource};
use skill_packager::{PackagerError, Result};

/// Everything resolved before the build starts.
struct Prepared {
    config: PackagerConfig,
    options: BuildOptions,
    checkout: Checkout,
    workspace: Option<CloneWorkspace>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => return report_error(&cli, &PackagerError::Io(e)),
    };

    let code = runtime.block_on(run(&cli));
    // A cancelled build may still be unwinding on the blocking pool.
    runtime.shutdown_background();
    code
}

async fn run(cli: &Cli) -> ExitCode {
    let Prepared {
        config,
        options,
        checkout,
        workspace,
    } = match prepare(cli) {
        Ok(prepared) => prepared,
        Err(e) => return report_error(cli, &e),
    };

    let build = {
        let checkout = checkout.clone();
        tokio::task::spawn_blocking(move || execute(&config, options, &checkout, &TracingLog))
    };

    tokio::select! {
        joined = build => {
            let retained = workspace.and_then(|workspace| workspace.release(&TracingLog));
            match joined {
                Ok(Ok(mut report)) => {
                    report.retained_temp_dir = retained;
                    emit_report(cli, &report)
                }
                Ok(Err(e)) => report_error(cli, &e),
                Err(e) => report_error(cli, &PackagerError::Internal(e.to_string())),
            }
        }
        Ok(()) = tokio::signal::ctrl_c() => {
            eprintln!("Operation cancelled by user.");
            // The clone child must be gone before its directory is removed.
            checkout.cancel();
            if let Some(workspace) = workspace {
                workspace.release(&TracingLog);
            }
            ExitCode::SUCCESS
        }
    }
}

fn prepare(cli: &Cli) -> Result<Prepared> {
    let config = PackagerConfig::load(cli.config.as_deref())?;
    let options = cli.build_options(&config)?;

    let (checkout, workspace) = match &cli.source_dir {
        Some(dir) => (Checkout::Local(dir.clone()), None),
        None => {
            let workspace = CloneWorkspace::create(cli.keep_temp)?;
            let checkout = Checkout::Clone {
                source: GitCloneSource::new(config.source.repo_url.clone()),
                dest: workspace.repo_dir(),
            };
            (checkout, Some(workspace))
        }
    };

    Ok(Prepared {
        config,
        options,
        checkout,
        workspace,
    })
}

fn emit_report(cli: &Cli, report: &BuildReport) -> ExitCode {
    if cli.robot {
        match serde_json::to_string_pretty(report) {
            Ok(json) => println!("{json}"),
            Err(e) => return report_error(cli, &PackagerError::Json(e)),
        }
    } else if !cli.quiet {
        print_report(report);
    }
    ExitCode::SUCCESS
}

fn report_error(cli: &Cli, e: &PackagerError) -> ExitCode {
    if cli.robot {
        // Robot mode: JSON error output to stdout
        let error_json = serde_json::json!({
            "error": true,
            "details": e.to_structured(),
        });
        println!("{}", serde_json::to_string(&error_json).unwrap_or_default());
    } else {
        eprintln!("Error: {e}");
    }
    ExitCode::FAILURE
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,skill_packager=info",
        1 => "info,skill_packager=debug",
        2 => "debug,skill_packager=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.robot {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
