//! Document handle backed by lopdf.
//!
//! This is the only module that talks to `lopdf` directly; the extraction
//! pipelines see a loaded [`PdfDocument`] and its narrow API.

use std::io::{self, Read};

use flate2::read::ZlibDecoder;
use lopdf::xref::{XrefEntry, XrefType};
use lopdf::{Dictionary, Document as LopdfDocument, Object, Stream};

use crate::address::ObjectAddress;
use crate::detect::{detect_format, PdfFormat};
use crate::error::{Error, Result};
use crate::model::{CrossReference, CrossReferenceTable, ObjectLocation, XrefKind};
use crate::source::{MemorySource, Source, SourceReader};

use super::encoding::decode_text_string;

/// Longest chain of references followed before giving up.
const MAX_REFERENCE_CHAIN: usize = 32;

/// A parsed PDF document. Read-only.
pub struct PdfDocument {
    doc: LopdfDocument,
    format: PdfFormat,
}

impl PdfDocument {
    /// Parse the document held by `source`.
    ///
    /// Reads the header first, then the whole source in one pass.
    pub fn load(source: &dyn Source) -> Result<Self> {
        let format = detect_format(source)?;

        let capacity = usize::try_from(source.size()?).unwrap_or(0);
        let mut buffer = Vec::with_capacity(capacity);
        SourceReader::new(source).read_to_end(&mut buffer)?;

        let doc = LopdfDocument::load_mem(&buffer)?;
        log::debug!(
            "loaded {} with {} objects, {} xref entries",
            format,
            doc.objects.len(),
            doc.reference_table.entries.len()
        );
        Ok(Self { doc, format })
    }

    /// Parse a document from bytes in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::load(&MemorySource::new(data))
    }

    /// Header information.
    pub fn format(&self) -> &PdfFormat {
        &self.format
    }

    /// The trailer dictionary.
    pub fn trailer(&self) -> &Dictionary {
        &self.doc.trailer
    }

    /// Whether the document declares encryption.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Project the cross-reference table, unresolved.
    pub fn cross_references(&self) -> CrossReferenceTable {
        let table = &self.doc.reference_table;
        let kind = match table.cross_reference_type {
            XrefType::CrossReferenceStream => XrefKind::Stream,
            XrefType::CrossReferenceTable => XrefKind::Table,
        };
        let entries = table
            .entries
            .iter()
            .map(|(&number, entry)| cross_reference(number, entry))
            .collect();
        CrossReferenceTable {
            kind,
            size: table.size,
            entries,
        }
    }

    /// Where `address` is stored, per the cross-reference table.
    ///
    /// `None` if the table has no in-use entry for it or the generation
    /// does not match.
    pub fn location_of(&self, address: ObjectAddress) -> Option<ObjectLocation> {
        let entry = self.doc.reference_table.entries.get(&address.object_number)?;
        let entry = cross_reference(address.object_number, entry);
        if entry.generation_number != address.generation_number {
            return None;
        }
        entry.location()
    }

    /// Resolve an indirect object.
    pub fn resolve(&self, address: ObjectAddress) -> Result<&Object> {
        let object = self
            .doc
            .objects
            .get(&address.into())
            .ok_or(Error::ReferenceNotFound(address))?;
        log::debug!("resolved {}", address);
        Ok(object)
    }

    /// Follow `object` through any chain of references.
    ///
    /// Returns `None` for references to missing objects, which PDF treats as
    /// null, and for chains longer than [`MAX_REFERENCE_CHAIN`].
    pub fn follow<'a>(&'a self, object: &'a Object) -> Option<&'a Object> {
        let mut current = object;
        for _ in 0..MAX_REFERENCE_CHAIN {
            match current {
                Object::Reference(id) => current = self.doc.objects.get(id)?,
                _ => return Some(current),
            }
        }
        None
    }

    /// Decode a stream's payload through its filter chain.
    ///
    /// A stream without `Filter` is returned as stored. A leading
    /// `FlateDecode` is inflated here so corrupt data fails instead of
    /// decoding to nothing; other filters and predictors go through lopdf.
    pub fn decode_stream(&self, address: ObjectAddress, stream: &Stream) -> Result<Vec<u8>> {
        let decode_error = |message: String| Error::Decode { address, message };

        let Ok(filter) = stream.dict.get(b"Filter") else {
            return Ok(stream.content.clone());
        };
        let filters = filter_names(filter);

        if filters.first().copied() == Some(b"FlateDecode".as_slice()) {
            let inflated = inflate(&stream.content).map_err(|e| decode_error(e.to_string()))?;
            if filters.len() == 1 && stream.dict.get(b"DecodeParms").is_err() {
                return Ok(inflated);
            }
        }
        stream
            .decompressed_content()
            .map_err(|e| decode_error(e.to_string()))
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Extracted text of each page, in page order.
    pub fn page_texts(&self) -> Result<Vec<String>> {
        self.doc
            .get_pages()
            .keys()
            .map(|&page_num| {
                self.doc
                    .extract_text(&[page_num])
                    .map_err(|e| Error::Parse(format!("page {}: {}", page_num, e)))
            })
            .collect()
    }

    /// The `Info` dictionary named by the trailer, if any.
    pub fn info(&self) -> Option<&Dictionary> {
        let info = self.doc.trailer.get(b"Info").ok()?;
        self.follow(info)?.as_dict().ok()
    }

    /// A text entry of the `Info` dictionary.
    pub fn info_string(&self, key: &[u8]) -> Option<String> {
        let value = self.follow(self.info()?.get(key).ok()?)?;
        match value {
            Object::String(bytes, _) => Some(decode_text_string(bytes)),
            Object::Name(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }
}

fn filter_names(filter: &Object) -> Vec<&[u8]> {
    match filter {
        Object::Name(name) => vec![name.as_slice()],
        Object::Array(items) => items.iter().filter_map(|o| o.as_name().ok()).collect(),
        _ => Vec::new(),
    }
}

fn inflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut inflated = Vec::with_capacity(data.len() * 2);
    ZlibDecoder::new(data).read_to_end(&mut inflated)?;
    Ok(inflated)
}

fn cross_reference(object_number: u32, entry: &XrefEntry) -> CrossReference {
    let free = CrossReference {
        object_number,
        generation_number: 0,
        in_use: false,
        offset: None,
        object_stream_object_number: None,
        object_stream_index: None,
    };
    match *entry {
        XrefEntry::Normal { offset, generation } => CrossReference {
            generation_number: generation,
            in_use: true,
            offset: Some(offset),
            ..free
        },
        XrefEntry::Compressed { container, index } => CrossReference {
            in_use: true,
            object_stream_object_number: Some(container),
            object_stream_index: Some(index),
            ..free
        },
        XrefEntry::Free => free,
        XrefEntry::UnusableFree => CrossReference {
            generation_number: u16::MAX,
            ..free
        },
    }
}
