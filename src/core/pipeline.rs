use crate::core::{City, ConfigProvider, Pipeline, RawRecord, Storage, TransformResult};
use crate::domain::model::{ContinentTable, Database, GeoNamesRecord, SimpleMapsRow, SourceFormat};
use crate::utils::error::{EtlError, Result};

pub struct CityPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CityPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn source_format(&self) -> Result<SourceFormat> {
        SourceFormat::parse(self.config.source_format()).ok_or_else(|| {
            EtlError::InvalidConfigValueError {
                field: "source_format".to_string(),
                value: self.config.source_format().to_string(),
                reason: format!("Allowed values: {}", SourceFormat::SUPPORTED.join(", ")),
            }
        })
    }

    async fn load_continent_table(&self, path: &str) -> Result<ContinentTable> {
        tracing::debug!("Loading continent table from: {}", path);
        let bytes = self.storage.read_file(path).await?;
        let table = serde_json::from_slice(&bytes)?;
        Ok(table)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CityPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawRecord>> {
        let format = self.source_format()?;

        tracing::debug!(
            "Reading {} export from: {}",
            format.as_str(),
            self.config.input_path()
        );
        let bytes = self.storage.read_file(self.config.input_path()).await?;

        let records = match format {
            SourceFormat::GeoNames => {
                // 解析開放資料平台的巢狀 JSON 匯出
                let parsed: Vec<GeoNamesRecord> = serde_json::from_slice(&bytes)?;
                parsed.into_iter().map(RawRecord::GeoNames).collect()
            }
            SourceFormat::SimpleMaps => {
                let mut reader = csv::Reader::from_reader(bytes.as_slice());
                let mut rows = Vec::new();
                for row in reader.deserialize::<SimpleMapsRow>() {
                    rows.push(RawRecord::SimpleMaps(row?));
                }
                rows
            }
        };

        tracing::debug!("Parsed {} raw records", records.len());
        Ok(records)
    }

    async fn transform(&self, data: Vec<RawRecord>) -> Result<TransformResult> {
        // 保持輸入順序：不排序、不去重、不過濾
        let cities: Vec<City> = data.into_iter().map(RawRecord::normalize).collect();
        let cities_json = serde_json::to_string(&cities)?;

        Ok(TransformResult { cities, cities_json })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        // Read the continent table before touching any output file, so a
        // missing or malformed lookup aborts the run with nothing written.
        let continent = match self.config.continent_path() {
            Some(path) => Some(self.load_continent_table(path).await?),
            None => None,
        };

        let cities_filename = self.config.cities_filename();
        tracing::debug!(
            "Writing {} cities ({} bytes) to: {}",
            result.cities.len(),
            result.cities_json.len(),
            cities_filename
        );
        self.storage
            .write_file(cities_filename, result.cities_json.as_bytes())
            .await?;

        let primary = match continent {
            Some(continent) => {
                let database_filename = self.config.database_filename();
                let database = Database {
                    cities: result.cities,
                    continent,
                };
                let json = serde_json::to_string(&database)?;
                tracing::debug!("Writing combined database to: {}", database_filename);
                self.storage
                    .write_file(database_filename, json.as_bytes())
                    .await?;
                database_filename
            }
            None => {
                tracing::debug!("Continent merge disabled, cities file only");
                cities_filename
            }
        };

        Ok(format!("{}/{}", self.config.data_dir(), primary))
    }
}
