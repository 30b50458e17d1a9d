pub mod page;

pub use page::Page;

use portal_config::{ConfigWatcher, PortalConfig};
use portal_core::Result;
use portal_theme::Theme;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

/// Build the page described by `path` and write its markup to stdout.
///
/// With `watch`, keep running and re-apply the config each time the file
/// changes.  Element state survives a reload unless the theme or assets
/// changed, in which case the page is rebuilt from scratch.
pub async fn run(path: PathBuf, watch: bool) -> Result<()> {
    let mut config = portal_config::load(&path)?;
    let mut page = build(&config);
    emit(&page)?;

    if !watch {
        return Ok(());
    }

    let (_watcher, mut changes) = ConfigWatcher::spawn(&path);

    while changes.recv().await.is_some() {
        let next = match portal_config::load(&path) {
            Ok(next) => next,
            Err(e) => {
                warn!("keeping previous page: {e}");
                continue;
            }
        };
        if next == config {
            continue;
        }
        info!("page config changed; re-applying");

        if restyled(&config, &next) {
            info!("theme changed; rebuilding page");
            page = build(&next);
        } else if let Err(e) = page.apply(&next.elements) {
            warn!("config applied with errors: {e}");
        }

        config = next;
        emit(&page)?;
    }
    Ok(())
}

/// A page with every element that could be mounted; failures are logged.
fn build(config: &PortalConfig) -> Page {
    let mut page = Page::new(Theme::from_config(&config.theme, &config.assets));
    if let Err(e) = page.apply(&config.elements) {
        warn!("page built with errors: {e}");
    }
    page
}

fn restyled(old: &PortalConfig, new: &PortalConfig) -> bool {
    old.theme != new.theme || old.assets != new.assets
}

fn emit(page: &Page) -> Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", page.html())?;
    out.flush()?;
    Ok(())
}
