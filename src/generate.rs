//! Render an invoice in several languages and write the files.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rayon::prelude::*;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::core::{Invoice, InvoiceData, InvoiceError};
use crate::pdf::{self, RenderedInvoice};

/// Language rendered when none is requested.
pub const DEFAULT_LANGUAGE: &str = "EN";

/// Errors from a complete generation run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerateError {
    /// No language left after parsing the language list.
    #[error("no languages requested")]
    NoLanguages,

    /// A language code that cannot be used in a file name.
    #[error("invalid language code '{0}': use letters, digits, '-' or '_'")]
    InvalidLanguage(String),

    /// The translation table lacks labels the layout needs.
    #[error("missing labels for '{language}': {keys}")]
    MissingLabels { language: String, keys: String },

    /// Computing or rendering the invoice failed.
    #[error("failed to render invoice in '{language}': {source}")]
    Render {
        language: String,
        #[source]
        source: InvoiceError,
    },

    /// Invoice-wide derivation (totals, period) failed.
    #[error(transparent)]
    Invoice(#[from] InvoiceError),

    /// Writing an output file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What to generate and where.
#[derive(Debug, Clone)]
pub struct Options {
    /// Language codes in output order.
    pub languages: Vec<String>,
    /// File name base; the invoice number when `None`.
    pub pdf_name: Option<String>,
    /// Directory the PDFs are written to.
    pub output_dir: PathBuf,
    /// Date the invoice is issued on.
    pub issue_date: NaiveDate,
}

/// Split a comma-delimited language list ("EN, DE,,en" -> ["EN", "DE"]).
///
/// Entries are trimmed and empty entries dropped. Duplicates are removed
/// ignoring case, keeping the first spelling. Codes may only contain ASCII
/// letters, digits, '-' and '_' since they become part of file names.
pub fn parse_languages(list: &str) -> Result<Vec<String>, GenerateError> {
    unique_languages(list.split(',').map(str::trim).filter(|l| !l.is_empty()))
}

fn unique_languages<'a>(
    codes: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<String>, GenerateError> {
    let mut languages: Vec<String> = Vec::new();
    for code in codes {
        validate_language(code)?;
        if !languages.iter().any(|known| known.eq_ignore_ascii_case(code)) {
            languages.push(code.to_string());
        }
    }
    Ok(languages)
}

fn validate_language(code: &str) -> Result<(), GenerateError> {
    let valid = !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(GenerateError::InvalidLanguage(code.to_string()))
    }
}

/// Check that every language has all labels before any rendering starts,
/// so one run reports the complete list of missing keys.
fn check_labels(data: &InvoiceData, languages: &[String]) -> Result<(), GenerateError> {
    for language in languages {
        data.translations
            .labels(language)
            .map_err(|source| GenerateError::Render {
                language: language.clone(),
                source,
            })?;
        let missing = data.translations.missing_keys(language);
        if !missing.is_empty() {
            return Err(GenerateError::MissingLabels {
                language: language.clone(),
                keys: missing.join(", "),
            });
        }
    }
    Ok(())
}

/// Render every language in parallel. Each language is an independent task
/// over the shared read-only `invoice`; the first failure is returned.
pub fn render_all(
    invoice: &Invoice<'_>,
    languages: &[String],
) -> Result<Vec<RenderedInvoice>, GenerateError> {
    languages
        .par_iter()
        .map(|language| {
            pdf::render(invoice, language).map_err(|source| GenerateError::Render {
                language: language.clone(),
                source,
            })
        })
        .collect()
}

/// Render all requested languages, then write `<base>-<lang>.pdf` for each.
///
/// Nothing is written unless every language renders. The documents are
/// staged as temporary files in the output directory and only moved into
/// place once all of them are written; if moving one fails, the files
/// already moved are removed again. Returns the written paths in language
/// order.
pub fn generate(data: &InvoiceData, options: &Options) -> Result<Vec<PathBuf>, GenerateError> {
    let languages = unique_languages(options.languages.iter().map(String::as_str))?;
    if languages.is_empty() {
        return Err(GenerateError::NoLanguages);
    }
    check_labels(data, &languages)?;

    let invoice = Invoice::new(data, options.issue_date)?;
    log::info!(
        "Invoice {}: total {} over {} item(s)",
        invoice.number,
        invoice.totals.total.round_dp(2),
        data.client.items.len()
    );

    let rendered = render_all(&invoice, &languages)?;
    let base = options
        .pdf_name
        .clone()
        .unwrap_or_else(|| invoice.number.to_string());

    let staged = rendered
        .iter()
        .map(|document| stage(&options.output_dir, &base, document))
        .collect::<Result<Vec<_>, _>>()?;
    commit(staged)
}

/// A rendered document written to a temporary file next to its target.
struct Staged {
    file: NamedTempFile,
    path: PathBuf,
}

fn stage(dir: &Path, base: &str, document: &RenderedInvoice) -> Result<Staged, GenerateError> {
    let path = dir.join(pdf::file_name(base, &document.language));
    let io_error = |source| GenerateError::Io {
        path: path.clone(),
        source,
    };
    let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
    file.write_all(&document.bytes).map_err(io_error)?;
    file.as_file().sync_all().map_err(io_error)?;
    Ok(Staged { file, path })
}

/// Move every staged file into place, or none of them.
fn commit(staged: Vec<Staged>) -> Result<Vec<PathBuf>, GenerateError> {
    let mut written: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for Staged { file, path } in staged {
        if let Err(e) = file.persist(&path) {
            for done in &written {
                if let Err(remove) = fs::remove_file(done) {
                    log::warn!("Failed to remove {}: {remove}", done.display());
                }
            }
            return Err(GenerateError::Io {
                path,
                source: e.error,
            });
        }
        written.push(path);
    }
    for path in &written {
        log::info!("Wrote {}", path.display());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_list_parsing() {
        assert_eq!(parse_languages("EN").unwrap(), vec!["EN"]);
        assert_eq!(parse_languages("EN,DE").unwrap(), vec!["EN", "DE"]);
        assert_eq!(parse_languages(" EN , DE,,EN ").unwrap(), vec!["EN", "DE"]);
        assert_eq!(parse_languages("pt_BR,de-AT").unwrap(), vec!["pt_BR", "de-AT"]);
        assert!(parse_languages(" , ").unwrap().is_empty());
    }

    #[test]
    fn duplicates_ignore_case() {
        assert_eq!(parse_languages("EN,en,De,DE").unwrap(), vec!["EN", "De"]);
    }

    #[test]
    fn rejects_codes_unfit_for_file_names() {
        for list in ["../EN", "EN,a/b", "D E", "EN,..", "C:", "ÉN"] {
            let err = parse_languages(list).unwrap_err();
            assert!(
                matches!(err, GenerateError::InvalidLanguage(_)),
                "{list}: {err:?}"
            );
        }
        let err = parse_languages("EN,../x").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid language code '../x': use letters, digits, '-' or '_'"
        );
    }

    #[test]
    fn commit_moves_staged_files() {
        let dir = tempfile::tempdir().unwrap();
        let document = RenderedInvoice {
            language: "EN".into(),
            pages: 1,
            bytes: b"%PDF-1.5".to_vec(),
        };
        let staged = stage(dir.path(), "base", &document).unwrap();
        let written = commit(vec![staged]).unwrap();
        assert_eq!(written, vec![dir.path().join("base-EN.pdf")]);
        assert_eq!(fs::read(&written[0]).unwrap(), b"%PDF-1.5");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
