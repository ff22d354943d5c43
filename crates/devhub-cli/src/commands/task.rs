//! Checklist commands.
//!
//! Positions on the command line are 1-based, matching `task list`.

use clap::Subcommand;
use devhub_core::{Store, TaskList, TaskStatus, ValidationError};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task text (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List tasks
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Flip a task between in-progress and finished
    Toggle {
        /// Task position
        position: usize,
    },
    /// Mark a task finished
    Done {
        /// Task position
        position: usize,
    },
    /// Mark a task in progress again
    Undo {
        /// Task position
        position: usize,
    },
    /// Delete a task
    Rm {
        /// Task position
        position: usize,
    },
    /// Move a task to another position
    Mv {
        from: usize,
        to: usize,
    },
    /// Show completion progress
    Progress {
        #[arg(long)]
        json: bool,
    },
}

fn index(position: usize, tasks: &TaskList) -> Result<usize, ValidationError> {
    position.checked_sub(1).ok_or(ValidationError::OutOfBounds {
        collection: "tasks".into(),
        index: position,
        len: tasks.len(),
    })
}

fn print_list(tasks: &TaskList) {
    if tasks.is_empty() {
        println!("(no tasks)");
        return;
    }
    for (i, task) in tasks.tasks().iter().enumerate() {
        let mark = if task.is_finished() { "x" } else { " " };
        println!("{:>3}. [{mark}] {}", i + 1, task.text);
    }
}

fn mark(
    store: &Store,
    tasks: &mut TaskList,
    position: usize,
    status: TaskStatus,
) -> Result<(), Box<dyn std::error::Error>> {
    let idx = index(position, tasks)?;
    tasks.set_status(idx, status)?;
    store.save_tasks(tasks)?;
    if let Some(task) = tasks.get(idx) {
        println!("task {position}: {} ({})", status.label(), task.text);
    }
    Ok(())
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let mut tasks = store.load_tasks()?;

    match action {
        TaskAction::Add { text } => {
            let task = tasks.add(&text.join(" "))?;
            println!("added: {}", task.text);
            store.save_tasks(&tasks)?;
        }
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                print_list(&tasks);
            }
        }
        TaskAction::Toggle { position } => {
            let status = tasks.toggle(index(position, &tasks)?)?;
            store.save_tasks(&tasks)?;
            println!("task {position}: {}", status.label());
        }
        TaskAction::Done { position } => {
            mark(&store, &mut tasks, position, TaskStatus::Finished)?;
        }
        TaskAction::Undo { position } => {
            mark(&store, &mut tasks, position, TaskStatus::InProgress)?;
        }
        TaskAction::Rm { position } => {
            let removed = tasks.remove(index(position, &tasks)?)?;
            store.save_tasks(&tasks)?;
            println!("removed: {}", removed.text);
        }
        TaskAction::Mv { from, to } => {
            let (from_idx, to_idx) = (index(from, &tasks)?, index(to, &tasks)?);
            tasks.move_task(from_idx, to_idx)?;
            store.save_tasks(&tasks)?;
            print_list(&tasks);
        }
        TaskAction::Progress { json } => {
            let progress = tasks.progress();
            if json {
                println!("{}", serde_json::to_string_pretty(&progress)?);
            } else {
                println!(
                    "{}/{} done ({:.0}%)",
                    progress.completed, progress.total, progress.percent
                );
            }
        }
    }
    Ok(())
}
