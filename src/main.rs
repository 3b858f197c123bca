use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::{env, fmt, fs};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};

use folio::config::{read_config, Config};
use folio::library::Library;
use folio::logger::configure_logger;
use folio::query::{filter_by_category, search_posts, sort_by_date};
use folio::scaffold;
use folio::source::DirSource;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file. Defaults to folio.toml next to the executable
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List published posts, most recent first
    List {
        /// Keep only posts in this category
        #[arg(long)]
        category: Option<String>,

        /// Keep only posts whose title, excerpt or body contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Show a single post by its slug
    Show {
        slug: String,
    },
    /// Parse every document and report the problems found
    Check,
    /// Generate a new post skeleton
    New {
        /// Title of the post
        #[arg(short, long)]
        title: String,

        /// Name of the author. If empty, the default byline is used
        #[arg(short, long)]
        name: Option<String>,

        /// Post generation options
        #[arg(short, long, default_value_t = NewOutput::Stdout)]
        output: NewOutput,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum NewOutput {
    Stdout,
    File,
}

impl Display for NewOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NewOutput::Stdout => write!(f, "stdout"),
            NewOutput::File => write!(f, "file"),
        }
    }
}

fn open_config(arg: Option<PathBuf>) -> Result<Config> {
    let cfg_path = match arg {
        Some(path) => path,
        None => {
            let exe_path = env::current_exe()?;
            let exe_dir = exe_path.parent().context("Could not resolve the executable directory")?;
            exe_dir.join("folio.toml")
        }
    };
    Ok(read_config(&cfg_path)?)
}

fn open_library(config_arg: Option<PathBuf>) -> Result<Library<DirSource>> {
    let config = open_config(config_arg)?;
    configure_logger(&config)?;
    Ok(Library::new(DirSource::new(config.paths.posts_dir)))
}

fn list_cmd(library: &Library<DirSource>, category: Option<&str>, search: Option<&str>) -> Result<()> {
    let previews = library.load_published_previews()?;
    let previews = filter_by_category(&previews, category.unwrap_or(""));
    let previews = search_posts(&previews, search.unwrap_or(""));
    let previews = sort_by_date(&previews);

    if previews.is_empty() {
        println!("No posts published yet.");
        return Ok(());
    }

    for preview in &previews {
        let header = &preview.header;
        println!("{}  {} min  {}  ({})",
                 header.date, header.reading_time, header.title, header.slug);
    }
    Ok(())
}

fn show_cmd(library: &Library<DirSource>, slug: &str) -> Result<()> {
    match library.load_by_slug(slug) {
        Some(post) => println!("{}", post),
        None => println!("Post not found: {}", slug),
    }
    Ok(())
}

fn check_cmd(library: &Library<DirSource>) -> Result<()> {
    let (total, failures) = library.check()?;
    if failures.is_empty() {
        println!("{} documents checked, no problems found", total);
        return Ok(());
    }

    for failure in &failures {
        eprintln!("{}", failure);
    }
    bail!("{} of {} documents failed to parse", failures.len(), total);
}

fn new_cmd(title: &str, name: Option<&str>, output: NewOutput) -> Result<()> {
    let date = Utc::now().date_naive();
    let raw = scaffold::render_document(title, name, &date);

    match output {
        NewOutput::Stdout => println!("{}", raw),
        NewOutput::File => {
            let file_name = format!("{}.md", scaffold::slug_from_title(title));
            fs::write(&file_name, raw)
                .with_context(|| format!("Error creating {}", file_name))?;
            println!("Created {}", file_name);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::New { title, name, output } => new_cmd(&title, name.as_deref(), output),
        Command::List { category, search } => {
            let library = open_library(cli.config)?;
            list_cmd(&library, category.as_deref(), search.as_deref())
        }
        Command::Show { slug } => {
            let library = open_library(cli.config)?;
            show_cmd(&library, &slug)
        }
        Command::Check => {
            let library = open_library(cli.config)?;
            check_cmd(&library)
        }
    }
}
