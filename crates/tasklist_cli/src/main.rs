use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use tasklist_cli::cli::{Cli, Command};
use tasklist_core::config::{self, Palette};
use tasklist_core::controller::{Event, Outcome, Session};
use tasklist_core::error::AppError;
use tasklist_core::model::Task;
use tasklist_core::storage::json_store;
use tasklist_core::view::ViewModel;

fn print_task_json(task: &Task) {
    let json = serde_json::json!({
        "id": task.id,
        "text": task.text,
        "completed": task.completed,
        "createdAt": task.created_at,
    });
    println!("{json}");
}

fn print_view_json(view: &ViewModel) {
    let rows: Vec<serde_json::Value> = view
        .rows
        .iter()
        .map(|row| {
            serde_json::json!({
                "id": row.id,
                "text": row.text,
                "completed": row.completed,
                "createdAt": row.created_at,
                "editing": row.editing,
            })
        })
        .collect();
    let json = serde_json::json!({
        "rows": rows,
        "itemsLeft": view.items_left,
        "emptyMessage": view.empty_message,
    });
    println!("{json}");
}

fn print_view_plain(view: &ViewModel, palette: &Palette) {
    if let Some(message) = view.empty_message {
        println!("{}", palette.mutedize(message));
    } else {
        for row in &view.rows {
            let checkbox = if row.completed { "[x]" } else { "[ ]" };
            let text = if row.completed {
                palette.mutedize(&row.text)
            } else {
                row.text.clone()
            };
            let meta = palette.mutedize(&format!("({} | {})", row.id, row.created_at));
            if row.editing {
                let marker = palette.accentize("(editing)");
                println!("{checkbox} {text} {meta} {marker}");
            } else {
                println!("{checkbox} {text} {meta}");
            }
        }
    }
    println!("{}", palette.accentize(&view.items_left));
}

fn render_view(view: &ViewModel, palette: &Palette, json: bool) {
    if json {
        print_view_json(view);
    } else {
        print_view_plain(view, palette);
    }
}

fn report_outcome(outcome: &Outcome, json: bool, palette: &Palette) {
    match outcome {
        Outcome::Added(task) => {
            if json {
                print_task_json(task);
            } else {
                println!("Added task: {} ({})", task.text, task.id);
            }
        }
        Outcome::Toggled(task) => {
            if json {
                print_task_json(task);
            } else if task.completed {
                println!("Completed task: {} ({})", task.text, task.id);
            } else {
                println!("Reopened task: {} ({})", task.text, task.id);
            }
        }
        Outcome::Edited(task) => {
            if json {
                print_task_json(task);
            } else {
                println!("Updated task: {} ({})", task.text, task.id);
            }
        }
        Outcome::Deleted(task) => {
            if json {
                print_task_json(task);
            } else {
                println!("Removed task: {} ({})", task.text, task.id);
            }
        }
        Outcome::EditingStarted(id) => {
            if !json {
                let hint = palette.accentize("type the new text and press Enter");
                println!("Editing task {id} ({hint})");
            }
        }
        Outcome::Cleared(removed) if *removed > 0 => {
            if json {
                println!("{}", serde_json::json!({ "removed": removed }));
            } else {
                println!("Completed tasks cleared ({removed})");
            }
        }
        // Silent paths: no-ops, blank commits, filter changes.
        Outcome::Cleared(_) | Outcome::EditingEnded(_) | Outcome::FilterSet(_) | Outcome::Ignored => {}
    }
}

fn exec(
    command: Command,
    json: bool,
    session: &mut Session,
    palette: &Palette,
    interactive: bool,
) -> Result<(), AppError> {
    let mut mutated = false;

    match command {
        Command::Add { text } => {
            let outcome = session.dispatch(Event::AddRequested(text.join(" ")))?;
            mutated = matches!(&outcome, Outcome::Added(_));
            report_outcome(&outcome, json, palette);
        }
        Command::Toggle { id } => {
            let outcome = session.dispatch(Event::ToggleRequested(id))?;
            mutated = matches!(&outcome, Outcome::Toggled(_));
            report_outcome(&outcome, json, palette);
        }
        Command::Edit { id, new_text } => {
            let event = if new_text.is_empty() && interactive {
                Event::EditRequested(id)
            } else {
                Event::EditCommitted {
                    id,
                    text: new_text.join(" "),
                }
            };
            let outcome = session.dispatch(event)?;
            mutated = matches!(&outcome, Outcome::Edited(_));
            report_outcome(&outcome, json, palette);
        }
        Command::Delete { id } => {
            let outcome = session.dispatch(Event::DeleteRequested(id))?;
            mutated = matches!(&outcome, Outcome::Deleted(_));
            report_outcome(&outcome, json, palette);
        }
        Command::Clear => {
            let outcome = session.dispatch(Event::ClearCompletedRequested)?;
            mutated = matches!(&outcome, Outcome::Cleared(removed) if *removed > 0);
            report_outcome(&outcome, json, palette);
        }
        Command::List { filter } => {
            if let Some(filter) = filter {
                session.dispatch(Event::FilterChanged(filter.into()))?;
            }
            render_view(&session.view(), palette, json);
        }
        Command::Filter { filter } => {
            session.dispatch(Event::FilterChanged(filter.into()))?;
            render_view(&session.view(), palette, json);
        }
        Command::Show => {
            render_view(&session.view(), palette, json);
        }
    }

    // Interactive sessions re-render after every change, mirroring the
    // operation -> persist -> re-render cycle of the view layer.
    if interactive && mutated {
        render_view(&session.view(), palette, json);
    }

    Ok(())
}

fn open_session() -> Result<Session, AppError> {
    let path = json_store::store_path()?;
    let (session, diagnostic) = Session::open(&path);
    if let Some(err) = diagnostic {
        eprintln!("WARNING: {err}");
    }
    Ok(session)
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    let config_load = config::load_config_with_fallback();
    if let Some(err) = &config_load.error {
        eprintln!("WARNING: {err}");
    }
    let theme = cli.theme.or(config_load.config.theme);
    let palette = config::palette_for_theme(theme.as_deref());

    let mut session = open_session()?;
    exec(cli.command, cli.json, &mut session, &palette, false)
}

fn parse_error_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string()
}

fn split_command_line(line: &str) -> Result<Vec<String>, String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(current.clone());
                current.clear();
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err("unterminated quote in command".to_string());
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_interactive() -> Result<(), AppError> {
    let config_load = config::load_config_with_fallback();
    if let Some(err) = &config_load.error {
        eprintln!("WARNING: {err}");
    }
    let aliases = config_load.config.aliases;
    let palette = config::palette_for_theme(config_load.config.theme.as_deref());

    let mut session = open_session()?;
    render_view(&session.view(), &palette, false);

    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();

        // While a task is open for editing, the next line is its new text.
        // A blank line commits nothing and leaves the original untouched.
        if let Some(id) = session.editing().map(str::to_string) {
            match session.dispatch(Event::EditCommitted {
                id,
                text: line.to_string(),
            }) {
                Ok(outcome) => {
                    report_outcome(&outcome, false, &palette);
                    render_view(&session.view(), &palette, false);
                }
                Err(err) => eprintln!("ERROR: {err}"),
            }
            continue;
        }

        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let mut args = match split_command_line(line) {
            Ok(args) => args,
            Err(message) => {
                eprintln!("ERROR: {message}");
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        if let Some(expansion) = aliases.get(&args[0]) {
            let mut expanded: Vec<String> =
                expansion.split_whitespace().map(str::to_string).collect();
            expanded.extend(args.drain(1..));
            args = expanded;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("tasklist".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", parse_error_message(&err));
                continue;
            }
        };

        if let Err(err) = exec(cli.command, cli.json, &mut session, &palette, true) {
            eprintln!("ERROR: {err}");
        }
    }

    Ok(())
}

fn main() {
    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive() {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            use clap::error::ErrorKind;
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                print!("{err}");
                return;
            }
            eprintln!("ERROR: {}", parse_error_message(&err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
