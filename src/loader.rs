//! Filter catalogs stored as JSON files.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use fltr_engine::{
    CancelToken, CategoryItem, FilterLoader, FilterSetKind, FiltersResponse, LoadCompletion,
    LoadError,
};
use log::{debug, trace};

/// Reads `<dir>/<filter set>.json` on a worker thread.
#[derive(Debug, Clone)]
pub struct JsonFileLoader {
    dir: PathBuf,
}

impl JsonFileLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the catalog for `kind`.
    #[must_use]
    pub fn catalog_path(&self, kind: &FilterSetKind) -> PathBuf {
        self.dir.join(format!("{}.json", kind.as_str()))
    }
}

fn read_catalog(path: &Path) -> Result<FiltersResponse, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl FilterLoader for JsonFileLoader {
    fn load(&self, kind: &FilterSetKind, cancel: CancelToken, completion: LoadCompletion) {
        let path = self.catalog_path(kind);
        debug!("reading filter catalog {}", path.display());
        thread::spawn(move || {
            if cancel.is_cancelled() {
                completion(Err(LoadError::Cancelled));
                return;
            }
            let result = read_catalog(&path);
            if cancel.is_cancelled() {
                trace!("discarding catalog {} read after cancellation", path.display());
                completion(Err(LoadError::Cancelled));
                return;
            }
            completion(result);
        });
    }
}

/// Read the local parameter categories from a JSON array of categories.
pub fn load_parameters(path: &Path) -> Result<Vec<CategoryItem>, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use fltr_engine::LoadResult;
    use tempfile::tempdir;

    use super::*;

    const CATALOG: &str = r#"{
        "filters": [
            {
                "name": "Region",
                "selectedFilterIds": [],
                "values": [
                    { "itemId": "", "name": "All", "itemType": 3 },
                    { "itemId": "w", "name": "West", "itemType": 1 }
                ]
            }
        ],
        "imageMapping": [{ "id": "w", "imageRef": "west.png" }]
    }"#;

    fn load(loader: &JsonFileLoader, kind: &str, cancel: CancelToken) -> LoadResult {
        let (tx, rx) = mpsc::channel();
        loader.load(
            &FilterSetKind::new(kind),
            cancel,
            Box::new(move |result| {
                let _ = tx.send(result);
            }),
        );
        rx.recv_timeout(Duration::from_secs(5)).expect("loader answered")
    }

    #[test]
    fn reads_catalog_named_after_filter_set() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("cars.json"), CATALOG).expect("write");
        let loader = JsonFileLoader::new(dir.path());

        let response = load(&loader, "cars", CancelToken::new()).expect("catalog");
        assert_eq!(response.filters.len(), 1);
        assert_eq!(response.filters[0].values.len(), 2);
        assert_eq!(response.image_mapping[0].image_ref, "west.png");
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempdir().expect("tempdir");
        let loader = JsonFileLoader::new(dir.path());
        let error = load(&loader, "boats", CancelToken::new()).expect_err("missing");
        assert!(matches!(error, LoadError::Io { ref path, .. } if path.ends_with("boats.json")));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("cars.json"), "{ not json").expect("write");
        let loader = JsonFileLoader::new(dir.path());
        let error = load(&loader, "cars", CancelToken::new()).expect_err("malformed");
        assert!(matches!(error, LoadError::Decode(_)));
    }

    #[test]
    fn cancelled_request_completes_with_cancellation() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("cars.json"), CATALOG).expect("write");
        let loader = JsonFileLoader::new(dir.path());
        let cancel = CancelToken::new();
        cancel.cancel();
        let error = load(&loader, "cars", cancel).expect_err("cancelled");
        assert!(error.is_cancelled());
    }

    #[test]
    fn parameters_file_holds_category_list() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("params.json");
        fs::write(
            &path,
            r#"[{ "name": "Sort", "values": [{ "itemId": "price", "name": "Price" }] }]"#,
        )
        .expect("write");
        let parameters = load_parameters(&path).expect("parameters");
        assert_eq!(parameters.len(), 1);
        assert_eq!(parameters[0].name, "Sort");
    }
}
