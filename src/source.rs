use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::{
    config::AppConfig,
    document::RawDocument,
    error::{Error, Result},
    requests::RequestClient,
};

/// Somewhere a statistics document can be loaded from.
#[allow(async_fn_in_trait)]
pub trait DocumentSource {
    async fn load(&self) -> Result<RawDocument>;
}

/// Fetches from the endpoint and mirrors every good response to the cache.
pub struct RemoteSource {
    client: RequestClient,
    url: String,
    cache_path: PathBuf,
}

impl RemoteSource {
    pub fn new(url: impl Into<String>, cache_path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            client: RequestClient::new()?,
            url: url.into(),
            cache_path: cache_path.into(),
        })
    }
}

impl DocumentSource for RemoteSource {
    async fn load(&self) -> Result<RawDocument> {
        let body = self.client.fetch_url_body(&self.url).await?;
        let doc = RawDocument::from_json(&body, &self.url)?;
        write_cache(&self.cache_path, &doc)?;
        Ok(doc)
    }
}

/// Reads the document saved by the last successful fetch.
pub struct CacheSource {
    path: PathBuf,
}

impl CacheSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for CacheSource {
    async fn load(&self) -> Result<RawDocument> {
        info!("Using cached data from {}", self.path.display());
        read_cache(&self.path)
    }
}

pub enum DataSource {
    Remote(RemoteSource),
    Cache(CacheSource),
}

impl DataSource {
    pub fn new(use_cache: bool, config: &AppConfig) -> Result<Self> {
        if use_cache {
            Ok(Self::Cache(CacheSource::new(&config.cache_file)))
        } else {
            Ok(Self::Remote(RemoteSource::new(
                config.data_url.clone(),
                &config.cache_file,
            )?))
        }
    }
}

impl DocumentSource for DataSource {
    async fn load(&self) -> Result<RawDocument> {
        match self {
            Self::Remote(source) => source.load().await,
            Self::Cache(source) => source.load().await,
        }
    }
}

/// Writes `doc` pretty-printed with a four space indent.
pub fn write_cache(path: &Path, doc: &RawDocument) -> Result<()> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    doc.serialize(&mut serializer).map_err(|source| Error::Parse {
        origin: path.display().to_string(),
        source,
    })?;
    buf.push(b'\n');

    fs::write(path, buf).map_err(|source| Error::CacheWrite {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_cache(path: &Path) -> Result<RawDocument> {
    let json = fs::read_to_string(path).map_err(|source| Error::CacheRead {
        path: path.to_path_buf(),
        source,
    })?;
    RawDocument::from_json(&json, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawDocument {
        RawDocument::from_json(
            r#"{
                "lasUpdatedOn": 1591012800,
                "currentDayStats": {
                    "numberInfected": 500,
                    "countyInfectionsNumbers": {"BN": 10, "CJ": 20},
                    "complete": false,
                    "parsedOnString": "2020-06-01",
                    "averageAge": "45"
                },
                "historicalData": {
                    "2020-05-31": {"numberInfected": 480, "countyInfectionsNumbers": {"BN": 8, "CJ": 18}}
                },
                "charts": {"cases": [1, 2]}
            }"#,
            "sample",
        )
        .unwrap()
    }

    #[test]
    fn cache_round_trip_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latest_data.json");
        let doc = sample();

        write_cache(&path, &doc).unwrap();
        assert_eq!(read_cache(&path).unwrap(), doc);
    }

    #[test]
    fn cache_is_indented_with_four_spaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latest_data.json");
        write_cache(&path, &sample()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n    \"lasUpdatedOn\": 1591012800"));
    }

    #[test]
    fn missing_cache_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_cache(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::CacheRead { .. }));
    }

    #[test]
    fn garbage_cache_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latest_data.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(read_cache(&path).unwrap_err(), Error::Parse { .. }));
    }

    #[tokio::test]
    async fn cached_source_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latest_data.json");
        write_cache(&path, &sample()).unwrap();
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        let config = AppConfig {
            cache_file: path.clone(),
            ..AppConfig::default()
        };
        let doc = DataSource::new(true, &config).unwrap().load().await.unwrap();
        assert_eq!(doc, sample());
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
    }
}
