//! Gradebook Dashboard
//!
//! Terminal dashboard for a running Gradebook server.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use gradebook::dashboard::{render, render_text, GraphKind, RecordsClient, Selection};
use gradebook::protocol::{NaturalKey, Student};
use gradebook::{GradebookError, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Gradebook Dashboard
#[derive(Parser, Debug)]
#[command(name = "gradebook-dashboard")]
#[command(about = "Dashboard for the Gradebook student records store")]
#[command(version)]
struct Args {
    /// Server base URL
    #[arg(short, long, default_value = "http://127.0.0.1:5000")]
    server: String,

    /// Request timeout (milliseconds)
    #[arg(long, default_value = "5000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Poll once and print a graph
    Show {
        /// Graph to show
        #[arg(short, long, value_enum, default_value_t = GraphKind::Combined)]
        graph: GraphKind,

        /// Student for the student-wise graph
        #[arg(long)]
        student: Option<String>,
    },

    /// Re-poll and print a graph on an interval until Ctrl+C
    Watch {
        /// Graph to show
        #[arg(short, long, value_enum, default_value_t = GraphKind::Combined)]
        graph: GraphKind,

        /// Student for the student-wise graph
        #[arg(long)]
        student: Option<String>,

        /// Seconds between polls
        #[arg(short, long, default_value = "5")]
        interval_secs: u64,
    },

    /// Add one student record
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        subject: String,

        #[arg(long)]
        marks: i64,
    },

    /// Add every record from a JSON array file
    AddBulk {
        /// File holding `[{"name", "subject", "marks"}, ...]`
        file: PathBuf,
    },

    /// Delete every record with this name and subject
    Delete {
        #[arg(long)]
        name: String,

        #[arg(long)]
        subject: String,
    },
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let client = RecordsClient::with_timeout(&args.server, Duration::from_millis(args.timeout_ms))?;

    match args.command {
        Commands::Show { graph, student } => {
            show(&client, &Selection::new(graph, student)).await;
        }
        Commands::Watch {
            graph,
            student,
            interval_secs,
        } => {
            let selection = Selection::new(graph, student);
            let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));

            loop {
                tokio::select! {
                    _ = ticker.tick() => show(&client, &selection).await,
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
        }
        Commands::Add {
            name,
            subject,
            marks,
        } => {
            let ack = client.add(&Student::new(name, subject, marks)).await?;
            println!("{}", ack.message);
            show(&client, &Selection::new(GraphKind::Table, None)).await;
        }
        Commands::AddBulk { file } => {
            let contents = std::fs::read_to_string(&file)?;
            let students: Vec<Student> = serde_json::from_str(&contents)
                .map_err(|e| GradebookError::Decode(format!("{}: {e}", file.display())))?;

            let ack = client.add_bulk(&students).await?;
            println!("{} ({})", ack.message, ack.count.unwrap_or(students.len()));
            show(&client, &Selection::new(GraphKind::Table, None)).await;
        }
        Commands::Delete { name, subject } => {
            let ack = client.delete(&NaturalKey::new(name, subject)).await?;
            println!("{} ({} removed)", ack.message, ack.deleted.unwrap_or(0));
            show(&client, &Selection::new(GraphKind::Table, None)).await;
        }
    }

    Ok(())
}

async fn show(client: &RecordsClient, selection: &Selection) {
    let snapshot = client.fetch_snapshot().await;
    print!("{}", render_text(&render(&snapshot, selection)));
}
