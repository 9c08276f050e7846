use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use notesmd::library::{download_file_name, format_relative_date, preview};
use notesmd::{Config, ContentDepth, Error, LibraryView, NotesArchive, SortKey};

#[derive(Parser)]
#[command(name = "notesmd", version)]
#[command(about = "Render and browse model-generated video notes")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a Markdown file to HTML
    Render {
        /// Input Markdown file, `-` for stdin
        input: PathBuf,

        /// Output HTML file (defaults to input name with .html extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List saved notes
    List {
        /// Notes archive exported from the extension
        archive: PathBuf,

        /// Only show notes whose title or text contains this
        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(long, value_enum)]
        sort: Option<SortKey>,
    },
    /// Print the rendered HTML of one saved note
    Show {
        archive: PathBuf,
        video_id: String,

        #[arg(long, value_enum, default_value_t = ContentDepth::Detailed)]
        depth: ContentDepth,
    },
    /// Write the Markdown of one saved note to a file
    Export {
        archive: PathBuf,
        video_id: String,

        /// Directory to write into
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let loaded;
    let config = match &cli.config {
        Some(path) => {
            loaded = Config::load(path);
            &loaded
        }
        None => Config::shared_default(),
    };

    if let Err(e) = run(cli.command, config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Command, config: &Config) -> Result<(), Error> {
    match command {
        Command::Render { input, output } => render(&input, output, config),
        Command::List {
            archive,
            search,
            sort,
        } => {
            let archive = NotesArchive::load(&archive)?;
            let view = LibraryView::new(search, sort.unwrap_or(config.library.default_sort));
            let now = Utc::now();
            let notes = view.project(archive.notes());
            if notes.is_empty() {
                println!("No notes yet");
            }
            for note in notes {
                println!(
                    "{}  {}  {}\n    {}",
                    note.video_id,
                    note.title,
                    format_relative_date(note.updated_at, now),
                    preview(note.notes.trim(), config.library.preview_chars).replace('\n', " ")
                );
            }
            println!("{} notes total", archive.len());
            Ok(())
        }
        Command::Show {
            archive,
            video_id,
            depth,
        } => {
            let archive = NotesArchive::load(&archive)?;
            let note = archive.get(&video_id)?;
            println!("{}", notesmd::render_with_config(note.text(depth), config));
            Ok(())
        }
        Command::Export {
            archive,
            video_id,
            dir,
        } => {
            let archive = NotesArchive::load(&archive)?;
            let note = archive.get(&video_id)?;
            let output = dir.join(download_file_name(&note.title));
            fs::write(&output, &note.notes).map_err(|e| Error::io(&output, e))?;
            println!("Created {}", output.display());
            Ok(())
        }
    }
}

fn render(input: &Path, output: Option<PathBuf>, config: &Config) -> Result<(), Error> {
    let from_stdin = input == Path::new("-");

    let markdown = if from_stdin {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| Error::io(input, e))?;
        buf
    } else {
        fs::read_to_string(input).map_err(|e| Error::io(input, e))?
    };

    let html = notesmd::render_with_config(&markdown, config);

    // stdin input without -o goes to stdout
    let output = match output {
        Some(path) => path,
        None if from_stdin => {
            println!("{}", html);
            return Ok(());
        }
        None => input.with_extension("html"),
    };

    fs::write(&output, html).map_err(|e| Error::io(&output, e))?;
    println!("Created {}", output.display());
    Ok(())
}
