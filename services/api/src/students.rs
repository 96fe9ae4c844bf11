use clap::{Args, Subcommand};
use student_marks::client::{ClientError, CollectionClient};
use student_marks::config::{AppConfig, ClientConfig};
use student_marks::error::AppError;
use student_marks::records::{classify_grade, MarkStats, StudentDraft, StudentId, StudentRecord};
use student_marks::telemetry;
use student_marks::view::{RefreshOutcome, StatsState, StatsView, StudentRoster, StudentsView};
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Args, Debug)]
pub(crate) struct StudentsArgs {
    /// Base URL of the student store (defaults to MARKS_API_URL)
    #[arg(long, global = true)]
    pub(crate) api_url: Option<String>,
    #[command(subcommand)]
    pub(crate) command: StudentsCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum StudentsCommand {
    /// Show every student with their grade band
    List,
    /// Add a student; blank names or courses are not submitted
    Add(AddArgs),
    /// Change some fields of an existing student
    Edit(EditArgs),
    /// Remove a student by id
    Delete {
        id: u64,
    },
    /// Show count, average, min, and max marks
    Stats,
}

#[derive(Args, Debug)]
pub(crate) struct AddArgs {
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long)]
    pub(crate) course: String,
    /// Mark out of 100; non-numeric input counts as 0 and values are clamped
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) mark: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct EditArgs {
    pub(crate) id: u64,
    #[arg(long)]
    pub(crate) name: Option<String>,
    #[arg(long)]
    pub(crate) course: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) mark: Option<String>,
}

pub(crate) async fn run(args: StudentsArgs) -> Result<(), AppError> {
    let StudentsArgs { api_url, command } = args;

    let config = AppConfig::load()?;
    telemetry::init_cli(&config.telemetry)?;

    let client_config = match api_url {
        Some(url) => ClientConfig::new(url)?,
        None => config.client,
    };
    let client = CollectionClient::from_config(&client_config);
    debug!(base_url = client.base_url(), "student store client ready");

    match command {
        StudentsCommand::List => list(client).await,
        StudentsCommand::Add(args) => add(client, args).await,
        StudentsCommand::Edit(args) => edit(client, args).await,
        StudentsCommand::Delete { id } => delete(client, StudentId(id)).await,
        StudentsCommand::Stats => stats(client).await,
    }
}

async fn list(client: CollectionClient) -> Result<(), AppError> {
    let mut view = StudentsView::new(client);
    view.load().await?;
    render_roster(view.roster());
    Ok(())
}

async fn add(client: CollectionClient, args: AddArgs) -> Result<(), AppError> {
    let draft = StudentDraft {
        name: Some(args.name),
        course: Some(args.course),
        mark: args.mark,
    };

    let mut view = StudentsView::new(client);
    match view.create(&draft).await {
        Ok(record) => {
            println!("Added student");
            render_record(&record);
            Ok(())
        }
        Err(ClientError::ValidationRejected(reason)) => {
            println!("Nothing submitted: {reason}");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

async fn edit(client: CollectionClient, args: EditArgs) -> Result<(), AppError> {
    let id = StudentId(args.id);
    let mut view = StudentsView::new(client);
    view.load().await?;

    let Some(current) = view.begin_edit(id) else {
        println!("No student with id {id}");
        return Ok(());
    };
    let draft = merge_edit(current, args);

    match view.update(id, &draft).await {
        Ok(record) => {
            println!("Updated student");
            render_record(&record);
            Ok(())
        }
        Err(ClientError::ValidationRejected(reason)) => {
            println!("Nothing submitted: {reason}");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

async fn delete(client: CollectionClient, id: StudentId) -> Result<(), AppError> {
    let mut view = StudentsView::new(client);
    view.delete(id).await?;
    println!("Deleted student {id}");
    Ok(())
}

async fn stats(client: CollectionClient) -> Result<(), AppError> {
    let view = StatsView::new();
    let cancel = CancellationToken::new();

    let interrupt = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let outcome = view.refresh(&client, &cancel).await;
    interrupt.abort();

    if outcome == RefreshOutcome::Discarded {
        println!("Stats request cancelled");
        return Ok(());
    }

    match view.snapshot() {
        StatsState::Ready(stats) => render_stats(&stats),
        StatsState::Failed(message) => println!("Stats: {message}"),
        StatsState::Loading => println!("Loading stats…"),
    }
    Ok(())
}

/// Fields not given on the command line keep their current values.
fn merge_edit(current: StudentDraft, args: EditArgs) -> StudentDraft {
    StudentDraft {
        name: args.name.or(current.name),
        course: args.course.or(current.course),
        mark: args.mark.or(current.mark),
    }
}

fn render_roster(roster: &StudentRoster) {
    if roster.is_empty() {
        println!("No students yet. Add one with `students add`.");
        return;
    }

    println!("Students");
    for record in roster.iter() {
        render_record(record);
    }
}

fn render_record(record: &StudentRecord) {
    let band = classify_grade(record.mark);
    println!(
        "- #{} {} | {} | {} ({}, {})",
        record.id,
        record.name,
        record.course,
        record.mark,
        band.label(),
        band.description()
    );
}

fn render_stats(stats: &MarkStats) {
    println!("Stats");
    println!("- Count: {}", stats.count);
    println!("- Average: {}", format_figure(stats.average.map(|avg| format!("{avg:.2}"))));
    println!("- Min: {}", format_figure(stats.min.map(|mark| mark.to_string())));
    println!("- Max: {}", format_figure(stats.max.map(|mark| mark.to_string())));
}

fn format_figure(value: Option<String>) -> String {
    value.unwrap_or_else(|| "n/a".to_string())
}
