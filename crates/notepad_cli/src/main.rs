//! Command-line host for the notepad core.
//!
//! # Responsibility
//! - Resolve the database path, open one session and seed the default folder.
//! - Map subcommands onto the note/folder stores and the query service.
//!
//! Storage failures at startup end the process with exit code 1.

use clap::{Parser, Subcommand, ValueEnum};
use log::warn;
use notepad_core::transfer::{import_into, write_export};
use notepad_core::{
    default_log_level, ensure_default_folder, init_logging, sorted_alphabetically,
    sorted_alphabetically_desc, sorted_by_date_of_creation, sorted_by_date_of_creation_desc,
    ExportFormat, FolderRepository, Note, NoteRepository, QueryService, Session,
    SqliteFolderRepository, SqliteNoteRepository, TagColor,
};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const DB_PATH_ENV: &str = "NOTEPAD_DB_PATH";
const DEFAULT_DB_FILE: &str = "notepad.sqlite3";

#[derive(Parser, Debug)]
#[command(name = "notepad", version, about = "Local note store")]
struct Cli {
    /// Database file. Falls back to $NOTEPAD_DB_PATH, then ./notepad.sqlite3
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Directory for rolling log files (absolute). Defaults next to the database
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all notes
    List {
        #[arg(long, value_enum, default_value_t = SortKey::Created)]
        sort: SortKey,
        /// Reverse the sort order
        #[arg(long)]
        desc: bool,
    },
    /// Search notes by title, tag and content
    Search {
        input: String,
        #[arg(long, value_enum, default_value_t = SearchField::All)]
        by: SearchField,
    },
    /// Add a note
    Add {
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        tag: Option<String>,
        #[arg(long, value_parser = parse_color, default_value = "None")]
        color: TagColor,
        /// Target folder id
        #[arg(long)]
        folder: Option<i64>,
    },
    /// Delete a note
    Delete { id: i64 },
    /// List folders
    Folders,
    /// Create a folder
    AddFolder { title: Option<String> },
    /// Delete a folder; its notes move to the default folder
    DeleteFolder { id: i64 },
    /// Import a .dno, .dzoniec or .txt file
    Import { path: PathBuf },
    /// Export a note into a directory
    Export {
        id: i64,
        dir: PathBuf,
        #[arg(long)]
        text: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortKey {
    Title,
    Created,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SearchField {
    Title,
    Tag,
    Snippet,
    All,
}

fn parse_color(value: &str) -> Result<TagColor, String> {
    TagColor::from_name(value).ok_or_else(|| {
        let names: Vec<&str> = TagColor::ALL.iter().map(|color| color.as_str()).collect();
        format!("expected one of {}", names.join(", "))
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db.clone());

    let log_dir = cli.log_dir.clone().unwrap_or_else(|| default_log_dir(&db_path));
    if let Err(err) = init_logging(default_log_level(), &log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    let session = match Session::open(&db_path) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("error: cannot open {}: {err}", db_path.display());
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = ensure_default_folder(&session) {
        eprintln!("error: cannot prepare {}: {err}", db_path.display());
        return ExitCode::FAILURE;
    }

    match run(&session, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(session: &Session, command: Command) -> Result<(), Box<dyn Error>> {
    let notes = SqliteNoteRepository::new(session);
    let folders = SqliteFolderRepository::new(session);

    match command {
        Command::List { sort, desc } => {
            let all = notes.get_all()?;
            let sorted = match (sort, desc) {
                (SortKey::Title, false) => sorted_alphabetically(all),
                (SortKey::Title, true) => sorted_alphabetically_desc(all),
                (SortKey::Created, false) => sorted_by_date_of_creation(all),
                (SortKey::Created, true) => sorted_by_date_of_creation_desc(all),
            };
            print_notes(&sorted);
        }
        Command::Search { input, by } => {
            let query = QueryService::new(&notes);
            let hits = match by {
                SearchField::Title => query.by_title(&input)?,
                SearchField::Tag => query.by_tag(&input)?,
                SearchField::Snippet => query.by_snippet(&input)?,
                SearchField::All => query.combined_by_input(&input)?,
            };
            print_notes(&hits);
        }
        Command::Add {
            title,
            content,
            tag,
            color,
            folder,
        } => {
            let mut note = Note::new(title.as_deref(), content.as_deref(), tag.as_deref(), color);
            if let Some(folder_id) = folder {
                note = note.in_folder(folder_id);
            }
            if let Some(added) = notes.add(Some(note))? {
                print_notes(std::slice::from_ref(&added));
            }
        }
        Command::Delete { id } => {
            if !notes.delete(id)? {
                warn!("event=cli_delete module=cli status=skip reason=not_found note_id={id}");
                println!("no note with id {id}");
            }
        }
        Command::Folders => {
            for folder in folders.get_all()? {
                println!("{}\t{}", folder.id().unwrap_or_default(), folder.title());
            }
        }
        Command::AddFolder { title } => {
            let folder = folders.add_titled(title.as_deref())?;
            println!("{}\t{}", folder.id().unwrap_or_default(), folder.title());
        }
        Command::DeleteFolder { id } => {
            if !folders.delete(id)? {
                println!("folder {id} was not deleted");
            }
        }
        Command::Import { path } => match import_into(&notes, &path)? {
            Some(note) => print_notes(std::slice::from_ref(&note)),
            None => println!("unsupported file type: {}", path.display()),
        },
        Command::Export { id, dir, text } => {
            let Some(note) = notes.read(id)? else {
                println!("no note with id {id}");
                return Ok(());
            };
            let format = if text {
                ExportFormat::Text
            } else {
                ExportFormat::Dno
            };
            let path = write_export(&note, format, &dir)?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn print_notes(notes: &[Note]) {
    for note in notes {
        println!(
            "{}\t{}\t{}\t{}\tfolder={}",
            note.id().unwrap_or_default(),
            note.title(),
            note.tag(),
            note.color(),
            note.folder_id()
        );
    }
}

fn resolve_db_path(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os(DB_PATH_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
}

fn default_log_dir(db_path: &Path) -> PathBuf {
    let parent = db_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let absolute = if parent.is_absolute() {
        parent
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&parent))
            .unwrap_or(parent)
    };
    absolute.join("logs")
}
