//! ogit CLI - minimal read-compatible object store command line interface

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use ogit::obj::{self, Object};
use ogit::repo::Repository;
use ogit::rev::{self, ExpectedType};
use ogit::{refs, revwalk};

#[derive(Parser)]
#[command(name = "ogit")]
#[command(about = "minimal, read-compatible content-addressed object store")]
#[command(version)]
struct Cli {
    /// repository path
    #[arg(short, long, default_value = ".")]
    repo: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// initialize a new repository
    Init {
        /// path to create repository at
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// compute an object's hash, optionally writing it into the store
    HashObject {
        /// file to hash
        file: PathBuf,

        /// object type: blob, tree, commit, tag
        #[arg(short = 't', long, default_value = "blob")]
        object_type: String,

        /// actually write the object to the store
        #[arg(short, long)]
        write: bool,
    },

    /// print information about a repository object
    CatFile {
        /// show the object's type
        #[arg(short = 't')]
        show_type: bool,

        /// show the object's size
        #[arg(short = 's')]
        show_size: bool,

        /// pretty-print the object's contents
        #[arg(short = 'p')]
        pretty: bool,

        /// object hash or name
        object: String,
    },

    /// list the contents of a tree object
    LsTree {
        /// tree-ish to list
        tree: String,
    },

    /// checkout a commit or tree into a directory
    Checkout {
        /// commit or tree to checkout
        commit: String,

        /// destination directory
        destination: PathBuf,
    },

    /// show the commit ancestry graph
    Log {
        /// commit to start from
        #[arg(default_value = "HEAD")]
        commit: String,
    },

    /// resolve a name to an object hash
    RevParse {
        /// expected object type: blob, tree, commit, tag
        #[arg(short = 't', long)]
        object_type: Option<String>,

        /// name to resolve
        name: String,
    },

    /// list references
    ShowRef,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(cli: Cli) -> ogit::Result<()> {
    match cli.command {
        Commands::Init { path } => {
            Repository::create(&path)?;
            println!("initialized ogit repository at {}", path.display());
        }

        Commands::HashObject { file, object_type, write } => {
            let repo = if write { Some(Repository::open(&cli.repo, false)?) } else { None };
            let f = std::fs::File::open(&file).map_err(|source| ogit::Error::Io {
                path: file.clone(),
                source,
            })?;
            let oid = obj::hash(f, object_type.as_bytes(), repo.as_ref())?;
            println!("{oid}");
        }

        Commands::CatFile { show_type, show_size, pretty, object } => {
            let repo = Repository::open(&cli.repo, false)?;
            let oid = rev::find(&repo, &object, None, true)?;
            let parsed = obj::read(&repo, &oid)?;

            if show_type {
                println!("{}", String::from_utf8_lossy(parsed.type_tag()));
            }
            if show_size {
                println!("{}", parsed.canonical_payload()?.len());
            }
            if pretty || (!show_type && !show_size) {
                print_pretty(&parsed)?;
            }
        }

        Commands::LsTree { tree } => {
            let repo = Repository::open(&cli.repo, false)?;
            let oid = rev::find(&repo, &tree, Some(ExpectedType::Tree), true)?;
            let object = obj::read(&repo, &oid)?;
            let tree = object
                .as_tree()
                .ok_or_else(|| ogit::Error::MalformedObject(Some(oid), "not a tree".to_string()))?;

            for entry in &tree.entries {
                let kind = if entry.is_directory() { "tree" } else { "blob" };
                println!(
                    "{} {} {}\t{}",
                    String::from_utf8_lossy(&entry.mode),
                    kind,
                    entry.oid,
                    String::from_utf8_lossy(&entry.path)
                );
            }
        }

        Commands::Checkout { commit, destination } => {
            let repo = Repository::open(&cli.repo, false)?;
            let tree_oid = rev::find(&repo, &commit, Some(ExpectedType::Tree), true)?;
            let object = obj::read(&repo, &tree_oid)?;
            let tree = object
                .as_tree()
                .ok_or_else(|| ogit::Error::MalformedObject(Some(tree_oid), "not a tree".to_string()))?;

            ogit::checkout::checkout(&repo, tree, &destination)?;
            println!("checked out {} to {}", commit, destination.display());
        }

        Commands::Log { commit } => {
            let repo = Repository::open(&cli.repo, false)?;
            let oid = rev::find(&repo, &commit, Some(ExpectedType::Commit), true)?;
            let edges = revwalk::log(&repo, oid)?;

            for edge in edges {
                println!("{} {}", edge.commit, edge.parent);
            }
        }

        Commands::RevParse { object_type, name } => {
            let repo = Repository::open(&cli.repo, false)?;
            let expected = object_type
                .as_deref()
                .map(parse_expected_type)
                .transpose()?;
            let oid = rev::find(&repo, &name, expected, true)?;
            println!("{oid}");
        }

        Commands::ShowRef => {
            let repo = Repository::open(&cli.repo, false)?;
            print_ref_tree(&refs::list(&repo)?, "refs");
        }
    }

    Ok(())
}

fn print_ref_tree(tree: &std::collections::BTreeMap<String, refs::RefTree>, prefix: &str) {
    for (name, node) in tree {
        let path = format!("{prefix}/{name}");
        match node {
            refs::RefTree::Leaf(hash) => println!("{hash} {path}"),
            refs::RefTree::Node(children) => print_ref_tree(children, &path),
        }
    }
}

fn print_pretty(object: &Object) -> ogit::Result<()> {
    match object {
        Object::Blob(blob) => io::stdout()
            .write_all(&blob.bytes)
            .map_err(|source| ogit::Error::Io { path: "<stdout>".into(), source })?,
        Object::Tree(tree) => {
            for entry in &tree.entries {
                let kind = if entry.is_directory() { "tree" } else { "blob" };
                println!(
                    "{} {} {}\t{}",
                    String::from_utf8_lossy(&entry.mode),
                    kind,
                    entry.oid,
                    String::from_utf8_lossy(&entry.path)
                );
            }
        }
        Object::Commit(commit) => io::stdout()
            .write_all(&commit.serialize())
            .map_err(|source| ogit::Error::Io { path: "<stdout>".into(), source })?,
        Object::Tag(tag) => io::stdout()
            .write_all(&tag.serialize())
            .map_err(|source| ogit::Error::Io { path: "<stdout>".into(), source })?,
    }
    Ok(())
}

fn parse_expected_type(s: &str) -> ogit::Result<ExpectedType> {
    match s {
        "blob" => Ok(ExpectedType::Blob),
        "tree" => Ok(ExpectedType::Tree),
        "commit" => Ok(ExpectedType::Commit),
        "tag" => Ok(ExpectedType::Tag),
        other => Err(ogit::Error::UnknownType(other.as_bytes().to_vec())),
    }
}
