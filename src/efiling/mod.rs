//! Preparing a finished application for the provincial e-filing hub.

mod submission;

use serde::{Deserialize, Serialize};

pub use submission::{
    next_transaction_id, InMemorySubmissionRepository, PackageCallback, SubmissionRecord,
    SubmissionRepository, SubmissionRepositoryError, UploadAcknowledgement,
};

/// Per-file upload limit applied when none is configured.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "gif", "png"];

/// File name and document type of the wizard's own application PDF.
pub const GENERATED_PDF_NAME: &str = "fpo_generated.pdf";
pub const GENERATED_DOCUMENT_TYPE: &str = "POR";

/// Metadata of a file the applicant attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
}

impl UploadedFile {
    fn extension(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    #[error("One of the files was empty.")]
    Empty,
    #[error("Filesize limit exceeded: {} MB.", .limit_bytes / (1024 * 1024))]
    TooLarge { limit_bytes: u64 },
    #[error("Wrong file format.")]
    WrongFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilingError {
    #[error(transparent)]
    Rejected(#[from] UploadRejection),
    #[error("PO PDF is not generated.")]
    MissingGeneratedPdf,
}

/// Checks applied to every upload before a package is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    max_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UPLOAD_BYTES)
    }
}

impl UploadPolicy {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Stops at the first file that fails; each file is checked for
    /// emptiness, then size, then extension.
    pub fn validate(&self, files: &[UploadedFile]) -> Result<(), UploadRejection> {
        for file in files {
            if file.size == 0 {
                return Err(UploadRejection::Empty);
            }
            if file.size > self.max_bytes {
                return Err(UploadRejection::TooLarge {
                    limit_bytes: self.max_bytes,
                });
            }
            let extension = file.extension().to_ascii_lowercase();
            if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
                return Err(UploadRejection::WrongFormat);
            }
        }
        Ok(())
    }
}

/// One file of the outgoing multipart payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingDocument {
    pub file_name: String,
    pub source_name: String,
    /// Images are rendered into a single-page PDF before upload.
    pub convert_to_pdf: bool,
}

impl OutgoingDocument {
    fn generated() -> Self {
        Self {
            file_name: GENERATED_PDF_NAME.to_string(),
            source_name: GENERATED_PDF_NAME.to_string(),
            convert_to_pdf: false,
        }
    }

    fn from_upload(upload: &UploadedFile) -> Self {
        if upload.name.ends_with(".pdf") {
            return Self {
                file_name: upload.name.clone(),
                source_name: upload.name.clone(),
                convert_to_pdf: false,
            };
        }

        let stem = upload
            .name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(upload.name.as_str());
        Self {
            file_name: format!("{stem}.pdf"),
            source_name: upload.name.clone(),
            convert_to_pdf: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageRequest {
    pub generated_pdf_ready: bool,
    pub files: Vec<UploadedFile>,
    pub document_types: Vec<String>,
}

/// Files and document types in the order the filing hub receives them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPackage {
    pub documents: Vec<OutgoingDocument>,
    pub document_types: Vec<String>,
}

impl SubmissionPackage {
    /// Validates the uploads and lays out the package with the generated
    /// application first.
    pub fn assemble(policy: &UploadPolicy, request: &PackageRequest) -> Result<Self, FilingError> {
        policy.validate(&request.files)?;
        if !request.generated_pdf_ready {
            return Err(FilingError::MissingGeneratedPdf);
        }

        let documents = std::iter::once(OutgoingDocument::generated())
            .chain(request.files.iter().map(OutgoingDocument::from_upload))
            .collect();
        let document_types = std::iter::once(GENERATED_DOCUMENT_TYPE.to_string())
            .chain(request.document_types.iter().cloned())
            .collect();

        Ok(Self {
            documents,
            document_types,
        })
    }

    pub fn conversions(&self) -> usize {
        self.documents.iter().filter(|doc| doc.convert_to_pdf).count()
    }
}
