use crate::{
    ConceptId, Language, Lexicon, OverlapTable, Qualifier, TermCatalog, WarningEntry, WarningTable,
};
use anyhow::{Context, Result, anyhow, bail};
use flate2::{Compression, read::GzDecoder, write::GzEncoder};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
    time::Instant,
};
use term_segmentation::SearchType;
use tracing::info;

/// On-disk shape of a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub languages: BTreeMap<Language, Vec<String>>,
    #[serde(default)]
    pub overlaps: Vec<OverlapRecord>,
    #[serde(default)]
    pub warnings: Vec<WarningRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapRecord {
    pub concept: ConceptId,
    pub language: Language,
    pub search_type: SearchTypeRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningRecord {
    pub term: String,
    pub language: Language,
    pub qualifier: QualifierRecord,
    pub source_message: String,
    pub target_message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchTypeRecord {
    Move,
    Search,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualifierRecord {
    #[serde(rename = "*")]
    Any,
    Move,
    Search,
    Name,
}

impl From<SearchTypeRecord> for SearchType {
    fn from(record: SearchTypeRecord) -> Self {
        match record {
            SearchTypeRecord::Move => SearchType::Move,
            SearchTypeRecord::Search => SearchType::Search,
            SearchTypeRecord::Name => SearchType::Name,
        }
    }
}

impl From<SearchType> for SearchTypeRecord {
    fn from(search_type: SearchType) -> Self {
        match search_type {
            SearchType::Move => SearchTypeRecord::Move,
            SearchType::Search => SearchTypeRecord::Search,
            SearchType::Name => SearchTypeRecord::Name,
        }
    }
}

impl From<QualifierRecord> for Qualifier {
    fn from(record: QualifierRecord) -> Self {
        match record {
            QualifierRecord::Any => Qualifier::Any,
            QualifierRecord::Move => Qualifier::Only(SearchType::Move),
            QualifierRecord::Search => Qualifier::Only(SearchType::Search),
            QualifierRecord::Name => Qualifier::Only(SearchType::Name),
        }
    }
}

impl From<Qualifier> for QualifierRecord {
    fn from(qualifier: Qualifier) -> Self {
        match qualifier {
            Qualifier::Any => QualifierRecord::Any,
            Qualifier::Only(SearchType::Move) => QualifierRecord::Move,
            Qualifier::Only(SearchType::Search) => QualifierRecord::Search,
            Qualifier::Only(SearchType::Name) => QualifierRecord::Name,
        }
    }
}

impl Lexicon {
    pub fn from_document(document: CatalogDocument) -> Result<Self> {
        let catalog = document
            .languages
            .into_iter()
            .fold(TermCatalog::builder(), |builder, (language, terms)| {
                builder.language(language, terms)
            })
            .build()
            .context("Invalid term catalog")?;

        let mut overlaps = OverlapTable::new();
        for record in document.overlaps {
            if record.concept.0 >= catalog.len() {
                bail!(
                    "overlap entry points at concept {} but the catalog has {} concepts",
                    record.concept.0,
                    catalog.len()
                );
            }
            if !catalog.has_language(record.language) {
                bail!("overlap entry names language `{}` the catalog does not carry", record.language);
            }
            overlaps.insert(record.concept, record.language, record.search_type.into());
        }

        let mut warnings = WarningTable::new();
        for record in document.warnings {
            warnings.insert(
                &record.term,
                record.language,
                WarningEntry {
                    qualifier: record.qualifier.into(),
                    source_message: record.source_message,
                    target_message: record.target_message,
                },
            );
        }

        Ok(Lexicon::new(catalog, overlaps, warnings))
    }

    /// Inverse of [`Lexicon::from_document`]. Overlap and warning records come
    /// out sorted so the written file is stable.
    pub fn to_document(&self) -> CatalogDocument {
        let catalog = self.catalog();
        let languages = catalog
            .languages()
            .languages()
            .filter_map(|language| Some((language, catalog.terms(language)?.to_vec())))
            .collect();

        let mut overlaps: Vec<OverlapRecord> = self
            .overlaps()
            .iter()
            .map(|(concept, language, search_type)| OverlapRecord {
                concept,
                language,
                search_type: search_type.into(),
            })
            .collect();
        overlaps.sort_by_key(|record| (record.concept, record.language));

        let mut warnings: Vec<WarningRecord> = self
            .warnings()
            .iter()
            .map(|(term, language, entry)| WarningRecord {
                term: term.to_string(),
                language,
                qualifier: entry.qualifier.into(),
                source_message: entry.source_message.clone(),
                target_message: entry.target_message.clone(),
            })
            .collect();
        warnings.sort_by(|a, b| (&a.term, a.language).cmp(&(&b.term, b.language)));

        CatalogDocument {
            languages,
            overlaps,
            warnings,
        }
    }
}

pub fn parse_lexicon(json: &str) -> Result<Lexicon> {
    let document: CatalogDocument =
        serde_json::from_str(json).context("Failed to decode catalog document")?;
    Lexicon::from_document(document)
}

pub fn read_lexicon(reader: impl Read) -> Result<Lexicon> {
    let document: CatalogDocument =
        serde_json::from_reader(reader).context("Failed to decode catalog document")?;
    Lexicon::from_document(document)
}

/// Reads a catalog file. Files ending in `.gz` are gunzipped first.
pub fn read_lexicon_from_file(path: &Path) -> Result<Lexicon> {
    let catalog_load_time = Instant::now();
    let input = File::open(path)
        .with_context(|| format!("Failed to open catalog file {}", path.display()))?;
    let input: Box<dyn Read> = if is_gzip(path) {
        Box::new(GzDecoder::new(input))
    } else {
        Box::new(input)
    };
    let lexicon = read_lexicon(BufReader::new(input))
        .with_context(|| format!("Failed to load catalog {}", path.display()))?;
    info!(
        concepts = lexicon.catalog().len(),
        languages = %lexicon.catalog().languages(),
        "Catalog load time: {:?}",
        catalog_load_time.elapsed()
    );
    Ok(lexicon)
}

/// Writes `lexicon` through a temporary file and renames it into place. The
/// temporary file is removed again if any step fails.
pub fn write_lexicon_to_file(path: &Path, lexicon: &Lexicon) -> Result<()> {
    let catalog_write_time = Instant::now();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create catalog directory")?;
    }
    let tmp_path = path.with_extension("sltmp");
    let document = lexicon.to_document();
    let written = write_document(&tmp_path, is_gzip(path), &document)
        .and_then(|()| fs::rename(&tmp_path, path).context("Failed to rename catalog file"));
    if let Err(err) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }
    info!("Catalog write time: {:?}", catalog_write_time.elapsed());
    Ok(())
}

fn write_document(path: &Path, gzip: bool, document: &CatalogDocument) -> Result<()> {
    let output = File::create(path).context("Failed to create catalog file")?;
    if gzip {
        let mut output = BufWriter::new(GzEncoder::new(output, Compression::default()));
        serde_json::to_writer(&mut output, document).context("Failed to encode catalog")?;
        output
            .into_inner()
            .map_err(|err| err.into_error())
            .context("Failed to flush catalog file")?
            .finish()
            .context("Failed to finish gzip stream")?;
    } else {
        let mut output = BufWriter::new(output);
        serde_json::to_writer_pretty(&mut output, document).context("Failed to encode catalog")?;
        output.flush().context("Failed to flush catalog file")?;
    }
    Ok(())
}

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

const BUNDLED_CATALOG: &str = include_str!("../data/catalog.json");

static BUNDLED: Lazy<Result<Lexicon, String>> =
    Lazy::new(|| parse_lexicon(BUNDLED_CATALOG).map_err(|err| format!("{err:#}")));

/// The catalog shipped with the crate, parsed on first use.
pub fn bundled_lexicon() -> Result<&'static Lexicon> {
    BUNDLED
        .as_ref()
        .map_err(|err| anyhow!("Bundled catalog is invalid: {err}"))
}
