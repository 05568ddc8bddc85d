use chrono::Utc;
use clap::{ArgAction, Parser};
use colored::Colorize;
use eyre::{Context, Result, eyre};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tasklist::{Config, Priority, StoreError, Task, TaskFilter, TaskStore};
use tracing::{Level, debug};

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "TaskList - in-memory task list session with filters and statistics")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to a YAML config file (default: <config dir>/tasklist/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start the session with the demonstration tasks
    #[arg(long)]
    demo: bool,

    /// Print query results as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

const HELP: &str = "\
Commands:
  add <high|medium|low> <text...>   Add a task
  toggle <id>                       Complete or reopen a task
  delete <id>                       Delete a task
  clear                             Delete all tasks
  filter <all|completed|pending|high>
  list                              Show tasks matching the active filter
  stats                             Show counters and completion rate
  analyze                           Show per-priority tally
  overdue                           Count overdue high priority tasks
  help                              Show this help
  quit                              End the session";

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref())?;

    let mut seeds = Vec::new();
    if cli.demo {
        seeds.extend(TaskStore::demo_seed());
    }
    seeds.extend(config.seed.iter().cloned());

    let store = TaskStore::with_seed(config.store_config(), seeds).context("Failed to seed task store")?;
    let mut session = Session {
        store,
        json: cli.json,
    };

    println!("{}", "Task Manager initialized!".bold());
    let overdue = session.store.overdue_count(Utc::now());
    if overdue > 0 {
        println!(
            "{}",
            format!("You have {} overdue high-priority task(s)!", overdue).yellow()
        );
    }
    println!("Type 'help' for commands.");

    session.run(io::stdin().lock())
}

/// Terminal view over a task store
struct Session {
    store: TaskStore,
    json: bool,
}

enum Flow {
    Continue,
    Quit,
}

impl Session {
    fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        let mut lines = input.lines();
        loop {
            print!("> ");
            io::stdout().flush()?;

            let line = match lines.next() {
                Some(line) => line.context("Failed to read input")?,
                None => break,
            };

            match self.dispatch(line.trim(), &mut lines) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => self.report(&e),
            }
        }
        Ok(())
    }

    fn dispatch<I>(&mut self, line: &str, lines: &mut I) -> Result<Flow>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        debug!(command, "Dispatching command");

        match command {
            "" => {}
            "add" => {
                let (priority, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let priority: Priority = priority.parse()?;
                let task = self.store.add(text, priority)?;
                println!("{} #{} {}", "Added".green(), task.id, task.text);
                if priority == Priority::High {
                    println!("High priority task added! Don't forget to complete it soon.");
                }
                self.show_statistics();
            }
            "toggle" => {
                let task = self.store.toggle(parse_id(rest)?)?;
                if task.completed {
                    println!("{} {}", "Task completed:".green(), task.text);
                } else {
                    println!("{} {}", "Task marked as pending:".yellow(), task.text);
                }
                self.show_statistics();
            }
            "delete" => {
                let id = parse_id(rest)?;
                let text = self.store.get(id).ok_or(StoreError::NotFound(id))?.text.clone();
                if confirm(&format!("Are you sure you want to delete \"{}\"?", text), lines)? {
                    let task = self.store.delete(id)?;
                    println!("{} {}", "Task deleted:".red(), task.text);
                    self.show_statistics();
                }
            }
            "clear" => {
                if self.store.is_empty() {
                    return Err(StoreError::Empty.into());
                }
                let prompt = format!("Are you sure you want to delete all {} tasks?", self.store.len());
                if confirm(&prompt, lines)? {
                    let count = self.store.clear_all()?;
                    println!("{} ({})", "All tasks cleared!".red(), count);
                    self.show_statistics();
                }
            }
            "filter" => {
                let filter: TaskFilter = rest.parse()?;
                self.store.set_filter(filter);
                println!("Filter applied: {}", filter.to_string().cyan());
                self.show_tasks();
            }
            "list" | "ls" => self.show_tasks(),
            "stats" => self.show_statistics(),
            "analyze" => {
                let analysis = self.store.analyze();
                if self.json {
                    print_json(&analysis);
                } else {
                    println!(
                        "high: {}  medium: {}  low: {}  completed: {}",
                        analysis.high, analysis.medium, analysis.low, analysis.completed
                    );
                }
            }
            "overdue" => {
                let count = self.store.overdue_count(Utc::now());
                if self.json {
                    print_json(&serde_json::json!({ "overdue": count }));
                } else if count > 0 {
                    println!(
                        "{}",
                        format!("You have {} overdue high-priority task(s)!", count).yellow()
                    );
                } else {
                    println!("No overdue high-priority tasks.");
                }
            }
            "help" | "?" => println!("{}", HELP),
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            other => println!("Unknown command '{}'. Type 'help' for commands.", other),
        }

        Ok(Flow::Continue)
    }

    fn report(&self, err: &eyre::Report) {
        let informational = err.downcast_ref::<StoreError>().is_some_and(StoreError::is_informational);
        if informational {
            println!("{}", err.to_string().yellow());
        } else {
            println!("{}", err.to_string().red());
        }
    }

    fn show_tasks(&self) {
        let tasks = self.store.filtered_tasks();
        if self.json {
            print_json(&tasks);
            return;
        }

        if tasks.is_empty() {
            println!("{}", "No tasks to display".dimmed());
            return;
        }
        for task in tasks {
            println!("{}", render_task(task));
        }
    }

    fn show_statistics(&self) {
        let stats = self.store.statistics();
        if self.json {
            print_json(&stats);
            return;
        }

        println!(
            "Total: {}  Completed: {}  Pending: {}  Rate: {:.1}%",
            stats.total, stats.completed, stats.pending, stats.completion_rate
        );
        if let Some(message) = stats.feedback() {
            println!("{}", message.italic());
        }
    }
}

fn render_task(task: &Task) -> String {
    let mark = if task.completed { "[x]" } else { "[ ]" };
    let priority = task.priority.as_str().to_uppercase();
    let priority = match task.priority {
        Priority::High => priority.red(),
        Priority::Medium => priority.yellow(),
        Priority::Low => priority.green(),
    };
    let text = if task.completed {
        task.text.strikethrough()
    } else {
        task.text.bold()
    };

    format!(
        "{:>4} {} {}  {} | Created: {}",
        task.id,
        mark,
        text,
        priority,
        task.created_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")
    )
}

fn parse_id(s: &str) -> Result<u64> {
    s.parse().map_err(|_| eyre!("Invalid task id '{}'", s))
}

fn confirm<I>(prompt: &str, lines: &mut I) -> Result<bool>
where
    I: Iterator<Item = io::Result<String>>,
{
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let answer = match lines.next() {
        Some(answer) => answer.context("Failed to read confirmation")?,
        None => return Ok(false),
    };
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}
