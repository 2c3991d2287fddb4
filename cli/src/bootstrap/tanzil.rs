//! Importer for the Tanzil quran text and metadata XML files.
//!
//! quran-data.xml carries per-sura metadata as attribute-only <sura>
//! elements, quran-uthmani.xml carries the Arabic text as <sura>
//! elements wrapping <aya index text bismillah?> elements.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use diesel::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use quran_backend::db::quran::{create_aya, create_sura};
use quran_backend::db::quran_models::{NewAya, NewSura};
use quran_backend::logger::info;

use crate::bootstrap::helpers::{get_attribute, required_attribute, required_int_attribute};

use super::QuranImporter;

#[derive(Debug, Clone)]
struct SuraMeta {
    number: i32,
    name: String,
    tname: String,
    ename: String,
    revelation_order: i32,
    revelation_type: String,
    rukus: i32,
}

#[derive(Debug, Clone)]
struct AyaData {
    number: i32,
    text: String,
    bismillah: Option<String>,
}

pub struct TanzilImporter {
    metadata_path: PathBuf,
    text_path: PathBuf,
    limit: Option<usize>,
}

impl TanzilImporter {
    pub fn new(metadata_path: PathBuf, text_path: PathBuf, limit: Option<usize>) -> Self {
        Self {
            metadata_path,
            text_path,
            limit,
        }
    }

    fn parse_sura_meta(&self, e: &BytesStart) -> Result<SuraMeta> {
        Ok(SuraMeta {
            number: required_int_attribute(e, "index")?,
            name: required_attribute(e, "name")?,
            tname: required_attribute(e, "tname")?,
            ename: required_attribute(e, "ename")?,
            revelation_order: required_int_attribute(e, "order")?,
            revelation_type: required_attribute(e, "type")?,
            rukus: required_int_attribute(e, "rukus")?,
        })
    }

    fn parse_metadata(&self) -> Result<Vec<SuraMeta>> {
        let xml_text = fs::read_to_string(&self.metadata_path)
            .with_context(|| format!("Failed to read file: {}", self.metadata_path.display()))?;

        let mut reader = Reader::from_reader(xml_text.as_bytes());

        let mut suras: Vec<SuraMeta> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                // quran-data.xml also lists juz, hizb and page boundaries,
                // only the <sura> elements matter here
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    if e.name().as_ref() == b"sura" {
                        suras.push(self.parse_sura_meta(e)?);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => anyhow::bail!(
                    "XML parse error in {}: {}",
                    self.metadata_path.display(),
                    e
                ),
                _ => {}
            }
            buf.clear();
        }

        suras.sort_by_key(|s| s.number);
        Ok(suras)
    }

    /// Ayas per sura number, in mushaf order.
    fn parse_text(&self) -> Result<HashMap<i32, Vec<AyaData>>> {
        let xml_text = fs::read_to_string(&self.text_path)
            .with_context(|| format!("Failed to read file: {}", self.text_path.display()))?;

        let mut reader = Reader::from_reader(xml_text.as_bytes());

        let mut ayas: HashMap<i32, Vec<AyaData>> = HashMap::new();
        let mut current_sura: Option<i32> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    match e.name().as_ref() {
                        b"sura" => {
                            current_sura = Some(required_int_attribute(e, "index")?);
                        }
                        b"aya" => {
                            let sura_number = current_sura
                                .ok_or_else(|| anyhow::anyhow!("<aya> element outside <sura>"))?;
                            ayas.entry(sura_number).or_default().push(AyaData {
                                number: required_int_attribute(e, "index")?,
                                text: required_attribute(e, "text")?,
                                bismillah: get_attribute(e, "bismillah"),
                            });
                        }
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => anyhow::bail!(
                    "XML parse error in {}: {}",
                    self.text_path.display(),
                    e
                ),
                _ => {}
            }
            buf.clear();
        }

        Ok(ayas)
    }
}

impl QuranImporter for TanzilImporter {
    fn import(&mut self, db_conn: &mut SqliteConnection) -> Result<()> {
        info("TanzilImporter::import()");

        let mut sura_metas = self.parse_metadata()?;
        let mut sura_ayas = self.parse_text()?;

        if let Some(limit) = self.limit {
            sura_metas.truncate(limit);
        }

        let progress_bar = ProgressBar::new(sura_metas.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("Importing suras [{bar:40}] {pos}/{len}")
                .expect("Invalid progress bar template")
                .progress_chars("=>-"),
        );

        let mut aya_count = 0;

        for meta in &sura_metas {
            let ayas = sura_ayas.remove(&meta.number).ok_or_else(|| {
                anyhow::anyhow!("No text found for sura {}", meta.number)
            })?;

            // The bismillah belongs to the sura, Tanzil attaches it to
            // the first aya.
            let bismillah = ayas.iter().find_map(|a| a.bismillah.clone());

            db_conn.transaction::<_, anyhow::Error, _>(|conn| {
                create_sura(conn, &NewSura {
                    number: meta.number,
                    name: &meta.name,
                    tname: &meta.tname,
                    ename: &meta.ename,
                    revelation_order: meta.revelation_order,
                    revelation_type: &meta.revelation_type,
                    rukus: meta.rukus,
                    bismillah: bismillah.as_deref(),
                })?;

                for aya in &ayas {
                    create_aya(conn, &NewAya {
                        sura_number: meta.number,
                        number: aya.number,
                        text: &aya.text,
                    })?;
                }

                Ok(())
            })?;

            aya_count += ayas.len();
            progress_bar.inc(1);
        }

        progress_bar.finish();
        info(&format!(
            "Imported {} suras, {} ayas",
            sura_metas.len(),
            aya_count
        ));

        Ok(())
    }
}
