//! create-itk-app - scaffold an itk.js/vtk.js React application

use anyhow::Result;
use clap::Parser;
use scaffold_core::config::RawOptions;
use scaffold_core::templates::OverwritePolicy;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "create-itk-app")]
#[command(about = "Scaffold an itk.js app on top of create-react-app")]
#[command(version)]
pub struct Args {
    /// Destination directory (defaults to the current directory)
    pub destination: Option<PathBuf>,

    /// App name
    #[arg(short = 'n', long = "appName", value_name = "app-name")]
    pub app_name: Option<String>,

    /// Description (contain in quotes)
    #[arg(short = 'd', long = "desc", value_name = "description")]
    pub description: Option<String>,

    /// Author name (contain in quotes)
    #[arg(short = 'a', long = "author", value_name = "full-name")]
    pub author: Option<String>,

    /// Author email address
    #[arg(short = 'e', long = "email")]
    pub email: Option<String>,

    /// Project's homepage
    #[arg(long = "homepage")]
    pub homepage: Option<String>,

    /// GitHub username or org (repo owner)
    #[arg(short = 'u', long = "user", value_name = "username")]
    pub user: Option<String>,

    /// Repository name
    #[arg(short = 'r', long = "repo", value_name = "repo-name")]
    pub repo: Option<String>,

    /// Accept every suggested default without prompting
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Leave existing craco.config.js / src/App.js in place when re-scaffolding
    #[arg(long = "skip-if-exists")]
    pub skip_if_exists: bool,
}

impl Args {
    fn into_options(self, destination: PathBuf) -> RawOptions {
        RawOptions {
            destination,
            app_name: self.app_name,
            description: self.description,
            author: self.author,
            email: self.email,
            homepage: self.homepage,
            github_user: self.user,
            repo: self.repo,
        }
    }
}

/// Absolutize the positional destination against the working directory.
fn resolve_destination(destination: Option<PathBuf>) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match destination {
        Some(path) if path.is_absolute() => path,
        Some(path) => cwd.join(path),
        None => cwd,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let destination = resolve_destination(args.destination.clone())?;
    let yes = args.yes;
    let policy = if args.skip_if_exists {
        OverwritePolicy::SkipIfExists
    } else {
        OverwritePolicy::Overwrite
    };
    let options = args.into_options(destination);

    let result = scaffold_core::run(&options, yes, policy).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
