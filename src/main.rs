use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Result, eyre};
use std::path::PathBuf;
use todolist::{Config, EditSession, Filter, Storage, TodoList, counts};

#[derive(Parser)]
#[command(name = "todolist")]
#[command(about = "Persistent todo list with filtering and manual ordering")]
#[command(version)]
struct Cli {
    /// Directory holding the persisted todos (overrides the config file)
    #[arg(short, long)]
    store_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new todo
    Add {
        /// Todo text
        text: Vec<String>,
    },

    /// List todos
    List {
        /// Show only all, active, or completed todos
        #[arg(short, long)]
        filter: Option<Filter>,
    },

    /// Toggle completion on a todo
    Toggle {
        /// Todo id (unique prefix accepted)
        id: String,
    },

    /// Replace the text of a todo
    Edit {
        /// Todo id (unique prefix accepted)
        id: String,
        /// Replacement text
        text: Vec<String>,
    },

    /// Delete a todo
    Rm {
        /// Todo id (unique prefix accepted)
        id: String,
    },

    /// Remove every completed todo
    Clear,

    /// Move a todo to a new position (0 = top)
    Mv {
        /// Todo id (unique prefix accepted)
        id: String,
        /// Target position in the full list
        position: usize,
    },
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::load();

    let store_dir = cli.store_dir.unwrap_or_else(|| config.store_dir());
    let storage = Storage::open(&store_dir)?;
    let mut list = TodoList::load(storage);

    match cli.command {
        Commands::Add { text } => match list.add(&text.join(" ")) {
            Some(id) => println!("Added {}", short_id(&id)),
            None => println!("Nothing to add: text is empty"),
        },
        Commands::List { filter } => {
            let filter = filter.or(config.default_filter).unwrap_or_default();
            print_list(&list, filter);
        }
        Commands::Toggle { id } => {
            let id = resolve_id(&list, &id)?;
            list.toggle(&id);
            let todo = list
                .get(&id)
                .ok_or_else(|| eyre!("Todo {} disappeared mid-toggle", short_id(&id)))?;
            let state = if todo.completed { "completed" } else { "active" };
            println!("{} is now {}", short_id(&id), state);
        }
        Commands::Edit { id, text } => {
            let id = resolve_id(&list, &id)?;
            let todo = list
                .get(&id)
                .ok_or_else(|| eyre!("No todo matching `{id}`"))?;

            let mut session = EditSession::default();
            if !session.begin(todo) {
                return Err(eyre!(
                    "Completed todos cannot be edited; toggle {} back to active first",
                    short_id(&id)
                ));
            }
            session.set_draft(&text.join(" "));
            if session.commit(&mut list) {
                println!("Updated {}", short_id(&id));
            } else {
                println!("Edit discarded: replacement text is empty");
            }
        }
        Commands::Rm { id } => {
            let id = resolve_id(&list, &id)?;
            list.delete(&id);
            println!("Deleted {}", short_id(&id));
        }
        Commands::Clear => {
            let removed = list.clear_completed();
            println!("Removed {removed} completed todo(s)");
        }
        Commands::Mv { id, position } => {
            let id = resolve_id(&list, &id)?;
            list.move_to(&id, position);
            let at = list
                .todos()
                .iter()
                .position(|t| t.id == id)
                .ok_or_else(|| eyre!("Todo {} disappeared mid-move", short_id(&id)))?;
            println!("Moved {} to position {at}", short_id(&id));
        }
    }

    Ok(())
}

fn print_list(list: &TodoList, filter: Filter) {
    let c = counts(list.todos());
    println!(
        "{} active, {} completed, {} total (showing {})",
        c.active, c.completed, c.total, filter
    );

    let mut shown = 0;
    for (position, todo) in list.todos().iter().enumerate() {
        if !filter.matches(todo) {
            continue;
        }
        shown += 1;

        let marker = if todo.completed { "[x]" } else { "[ ]" };
        let created = todo.created_at.format("%Y-%m-%d %H:%M").to_string();
        let line = format!(
            "{position:>3}  {}  {marker} {}",
            short_id(&todo.id),
            todo.text
        );
        if todo.completed {
            println!("{}  {}", line.dimmed().strikethrough(), created.dimmed());
        } else {
            println!("{line}  {}", created.dimmed());
        }
    }

    if shown == 0 {
        match filter {
            Filter::All => println!("No todos yet"),
            Filter::Active => println!("No active todos"),
            Filter::Completed => println!("No completed todos"),
        }
    }
}

/// Resolve a user-supplied id, accepting any unique prefix of a stored id.
fn resolve_id(list: &TodoList, input: &str) -> Result<String> {
    if list.get(input).is_some() {
        return Ok(input.to_string());
    }

    let matches: Vec<&todolist::Todo> = list
        .todos()
        .iter()
        .filter(|t| t.id.starts_with(input))
        .collect();

    match matches.len() {
        0 => Err(eyre!("No todo matching `{input}`")),
        1 => Ok(matches[0].id.clone()),
        _ => {
            let mut msg = format!("Ambiguous id `{input}`, candidates:\n");
            for todo in matches {
                msg.push_str(&format!("  {}  {}\n", short_id(&todo.id), todo.text));
            }
            msg.push_str("Use a longer prefix");
            Err(eyre!(msg))
        }
    }
}

fn short_id(id: &str) -> &str {
    &id[..id.len().min(8)]
}
