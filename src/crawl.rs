use crate::{error::*, LinkGraph};
use scraper::{Html, Selector};
use std::{fs, path::Path};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Reads every `.html` file directly inside `directory` and links each one to
/// the other files of the directory its anchors point at.
pub fn crawl(directory: impl AsRef<Path>) -> Result<LinkGraph> {
    let directory = directory.as_ref();
    let anchors = Selector::parse("a[href]")
        .map_err(|e| Error::InvalidArgument(format!("bad selector: {e:?}")))?;

    let mut pages = vec![];
    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            debug!("skipping non UTF-8 file name {:?}", entry.file_name());
            continue;
        };
        if !name.ends_with(".html") {
            continue;
        }
        let contents = fs::read_to_string(entry.path())?;
        let links = extract_links(&contents, &anchors);
        debug!("{name}: {} links", links.len());
        pages.push((name.to_string(), links));
    }

    info!("Crawled {} pages from {:?}", pages.len(), directory);
    Ok(LinkGraph::from_links(pages))
}

fn extract_links(html: &str, anchors: &Selector) -> Vec<String> {
    Html::parse_document(html)
        .select(anchors)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}
