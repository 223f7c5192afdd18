mod route;

use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use camino::{Utf8Path, Utf8PathBuf};
use jotter_lib::{
    config::{Mode, SiteConfig},
    post::{collection, Collection},
    site,
};
use notify::{RecursiveMode, Watcher};
use tracing::info;

const USAGE: &str = "Usage:
  jotter build <content-dir> <out-dir> [site.yaml]
  jotter serve <port> <content-dir> [site.yaml]";

#[derive(Debug, PartialEq)]
enum Command {
    Build {
        content_dir: Utf8PathBuf,
        out_dir: Utf8PathBuf,
        config: Option<Utf8PathBuf>,
    },
    Serve {
        port: u16,
        content_dir: Utf8PathBuf,
        config: Option<Utf8PathBuf>,
    },
}

impl Command {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let command = args.next().ok_or_else(|| anyhow!("Expected a command\n{USAGE}"))?;
        let command = match command.as_str() {
            "build" => Command::Build {
                content_dir: args
                    .next()
                    .ok_or_else(|| anyhow!("Expected a content directory\n{USAGE}"))?
                    .into(),
                out_dir: args
                    .next()
                    .ok_or_else(|| anyhow!("Expected an output directory\n{USAGE}"))?
                    .into(),
                config: args.next().map(Utf8PathBuf::from),
            },
            "serve" => Command::Serve {
                port: args
                    .next()
                    .ok_or_else(|| anyhow!("Expected a port number\n{USAGE}"))?
                    .parse()?,
                content_dir: args
                    .next()
                    .ok_or_else(|| anyhow!("Expected a content directory\n{USAGE}"))?
                    .into(),
                config: args.next().map(Utf8PathBuf::from),
            },
            other => bail!("Unknown command ({other:?})\n{USAGE}"),
        };
        if let Some(extra) = args.next() {
            bail!("Unexpected argument ({extra:?})\n{USAGE}");
        }
        Ok(command)
    }
}

fn build(content_dir: &Utf8Path, out_dir: &Utf8Path, config: Option<&Utf8Path>) -> Result<()> {
    let config = SiteConfig::load(config)?;
    let base = config.base_ref(Mode::Production);

    let posts = Collection::load(content_dir, false)?;

    site::write(out_dir, posts.posts(), &config, &base)?;

    Ok(())
}

async fn serve(port: u16, content_dir: &Utf8Path, config: Option<&Utf8Path>) -> Result<()> {
    let config = SiteConfig::load(config)?;
    let base = config.base_ref(Mode::Development);

    // drafts are visible while writing
    let posts = collection::ArcMutex::new(Collection::load(content_dir, true)?);

    let mut watcher = notify::recommended_watcher(posts.clone())?;

    watcher.watch(content_dir.as_std_path(), RecursiveMode::NonRecursive)?;

    let root = base.root();
    let app = route::router(route::AppState {
        posts,
        config: Arc::new(config),
        base: Arc::new(base),
    });

    let socket_addr_string = format!("0.0.0.0:{port}");
    info!("Serving {root} on {socket_addr_string}");
    axum::Server::bind(&socket_addr_string.parse()?)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

async fn run() -> Result<()> {
    match Command::parse(std::env::args().skip(1))? {
        Command::Build {
            content_dir,
            out_dir,
            config,
        } => build(&content_dir, &out_dir, config.as_deref()),
        Command::Serve {
            port,
            content_dir,
            config,
        } => serve(port, &content_dir, config.as_deref()).await,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(err) = run().await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod test {
    use camino::Utf8PathBuf;
    use pretty_assertions::assert_eq;

    use super::Command;

    fn parse(args: &[&str]) -> anyhow::Result<Command> {
        Command::parse(args.iter().map(|a| (*a).to_owned()))
    }

    #[test]
    fn parse_build() {
        assert_eq!(
            Command::Build {
                content_dir: Utf8PathBuf::from("src/content/blog"),
                out_dir: Utf8PathBuf::from("dist"),
                config: None,
            },
            parse(&["build", "src/content/blog", "dist"]).unwrap()
        );
    }

    #[test]
    fn parse_serve() {
        assert_eq!(
            Command::Serve {
                port: 4321,
                content_dir: Utf8PathBuf::from("posts"),
                config: Some(Utf8PathBuf::from("site.yaml")),
            },
            parse(&["serve", "4321", "posts", "site.yaml"]).unwrap()
        );
    }

    #[test]
    fn parse_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["publish"]).is_err());
        assert!(parse(&["build", "posts"]).is_err());
        assert!(parse(&["serve", "http", "posts"]).is_err());
        assert!(parse(&["build", "posts", "dist", "site.yaml", "extra"]).is_err());
    }
}
