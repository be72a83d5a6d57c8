use playlister::library::LibraryError;
use playlister::{Config, Playlister, Song};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const HELP: &str = "\
Commands:
  lists                          show all playlists
  new <name>                     create a playlist and open it
  open <n>                       open playlist n
  close                          close the current playlist
  rename <name>                  rename the current playlist
  remove <n>                     delete playlist n (cannot be undone)
  show                           show the songs of the current playlist
  add                            add a placeholder song
  delete <n>                     delete song n
  edit <n> <title>|<artist>|<id> edit song n
  move <from> <to>               move a song
  undo / redo
  help / quit";

/// Parse a 1-based position as typed by the user
fn parse_position(arg: Option<&str>) -> Option<usize> {
    arg?.trim().parse::<usize>().ok()?.checked_sub(1)
}

fn print_songs(session: &Playlister) -> Result<(), LibraryError> {
    println!("== {} ==", session.current_name()?);
    for (i, song) in session.current_songs()?.iter().enumerate() {
        println!("{:>3}. {}  <{}>", i + 1, song, song.media_url());
    }
    let toolbar = session.toolbar_state();
    let undo = if toolbar.undo {
        session.undo_size().to_string()
    } else {
        "-".to_string()
    };
    let redo = if toolbar.redo {
        session.redo_size().to_string()
    } else {
        "-".to_string()
    };
    println!("[undo: {}] [redo: {}]", undo, redo);
    Ok(())
}

fn list_id_at(
    session: &Playlister,
    arg: Option<&str>,
) -> Result<Option<uuid::Uuid>, LibraryError> {
    let summaries = session.list_summaries()?;
    Ok(parse_position(arg)
        .and_then(|position| summaries.get(position))
        .map(|s| s.id))
}

/// Run one shell command; returns false when the shell should exit
fn run_command(session: &mut Playlister, line: &str) -> Result<bool, LibraryError> {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    let mut args = rest.split_whitespace();

    match command {
        "" => {}
        "help" => println!("{}", HELP),
        "quit" | "exit" => return Ok(false),
        "lists" => {
            for (i, summary) in session.list_summaries()?.iter().enumerate() {
                let marker = if session.current_id() == Some(summary.id) {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{}{:>3}. {} ({} songs)",
                    marker,
                    i + 1,
                    summary.name,
                    summary.song_count
                );
            }
        }
        "new" => {
            let name = if rest.is_empty() { "Untitled" } else { rest };
            let id = session.add_new_list(name, Vec::new())?;
            session.load_list(id)?;
            session.save()?;
            print_songs(session)?;
        }
        "open" => match list_id_at(session, args.next())? {
            Some(id) => {
                session.load_list(id)?;
                print_songs(session)?;
            }
            None => println!("No such playlist"),
        },
        "close" => session.close_list(),
        "rename" => {
            let id = session.current_id().ok_or(LibraryError::NoListSelected)?;
            session.rename_list(id, rest)?;
            session.save()?;
        }
        "remove" => match list_id_at(session, args.next())? {
            Some(id) => {
                session.delete_list(id)?;
                session.save()?;
            }
            None => println!("No such playlist"),
        },
        "show" => print_songs(session)?,
        "add" => {
            session.add_song()?;
            session.save()?;
            print_songs(session)?;
        }
        "delete" => match parse_position(args.next()) {
            Some(index) => {
                session.delete_song(index)?;
                session.save()?;
                print_songs(session)?;
            }
            None => println!("Usage: delete <n>"),
        },
        "edit" => {
            let (position, details) = rest.split_once(' ').unwrap_or((rest, ""));
            let fields: Vec<&str> = details.split('|').map(str::trim).collect();
            match (parse_position(Some(position)), fields.as_slice()) {
                (Some(index), [title, artist, media_id]) => {
                    session.edit_song(index, Song::new(*title, *artist, *media_id))?;
                    session.save()?;
                    print_songs(session)?;
                }
                _ => println!("Usage: edit <n> <title>|<artist>|<id>"),
            }
        }
        "move" => match (parse_position(args.next()), parse_position(args.next())) {
            (Some(from), Some(to)) => {
                if session.move_song(from, to)? {
                    session.save()?;
                }
                print_songs(session)?;
            }
            _ => println!("Usage: move <from> <to>"),
        },
        "undo" => {
            match session.undo()? {
                Some(description) => println!("Undo: {}", description),
                None => println!("Nothing to undo"),
            }
            session.save()?;
        }
        "redo" => {
            match session.redo()? {
                Some(description) => println!("Redo: {}", description),
                None => println!("Nothing to redo"),
            }
            session.save()?;
        }
        other => println!("Unknown command \"{}\" (try help)", other),
    }

    Ok(true)
}

fn main() {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = match Config::load_or_default(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: failed to load config: {}", e);
            return;
        }
    };

    let _logger = match flexi_logger::Logger::try_with_env_or_str(&config.log_level)
        .and_then(|logger| logger.log_to_stderr().start())
    {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("WARNING: logging disabled: {}", e);
            None
        }
    };

    println!("=== Playlister ===");
    println!("Lists stored in {}\n", config.storage_path.display());

    let mut session = match Playlister::from_config(&config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return;
        }
    };

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("ERROR: {}", e);
                break;
            }
        }

        match run_command(&mut session, line.trim()) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => eprintln!("ERROR: {}", e),
        }
    }
}
