//! Prescription documents — types and PDF export.
//!
//! Doctors compose a prescription on the dashboard; Riskdesk renders
//! it to an A4 PDF with `printpdf` builtin fonts: clinic header,
//! patient block, numbered medicine table (name, risk level, dosage,
//! M/A/N schedule, duration), note footer and signature line.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::RiskLevel;

/// Clinic letterhead lines. The dashboard does not customize these
/// yet; they render at the top of every prescription.
const CLINIC_NAME: &str = "Riskdesk Clinic";
const CLINIC_SUBTITLE: &str = "Pharmaceutical Risk-Classification Unit";
const CLINIC_ADDRESS: &str = "123 Medical Street, Health City, IN 560001";
const CLINIC_CONTACT: &str = "Phone: +91 9876543210 | Email: contact@riskdesk.example";
const FOOTER_NOTE: &str =
    "Note: Please take medication as directed. Contact us for any queries.";

pub const MAX_PRESCRIPTION_LINES: usize = 20;

/// One medicine on a prescription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionLine {
    pub name: String,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub morning: bool,
    #[serde(default)]
    pub afternoon: bool,
    #[serde(default)]
    pub night: bool,
    #[serde(default)]
    pub duration_days: Option<u32>,
}

impl PrescriptionLine {
    /// Render the M/A/N schedule column ("M A N", "M N", ...).
    pub fn schedule(&self) -> String {
        let mut parts = Vec::new();
        if self.morning {
            parts.push("M");
        }
        if self.afternoon {
            parts.push("A");
        }
        if self.night {
            parts.push("N");
        }
        parts.join(" ")
    }
}

/// A prescription as composed on the doctor dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionRequest {
    pub patient_name: String,
    #[serde(default)]
    pub patient_age: Option<u32>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    pub lines: Vec<PrescriptionLine>,
}

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Invalid prescription: {0}")]
    Invalid(String),

    #[error("PDF render error: {0}")]
    Render(String),

    #[error("Cannot write document: {0}")]
    Io(String),
}

/// Reject requests the renderer should never see.
pub fn validate(request: &PrescriptionRequest) -> Result<(), DocumentError> {
    if request.patient_name.trim().is_empty() {
        return Err(DocumentError::Invalid("Patient name is required".into()));
    }
    if request.patient_name.trim().len() > 200 {
        return Err(DocumentError::Invalid(
            "Patient name is too long (max 200 characters)".into(),
        ));
    }
    if request.lines.is_empty() {
        return Err(DocumentError::Invalid(
            "Prescription needs at least one medicine".into(),
        ));
    }
    if request.lines.len() > MAX_PRESCRIPTION_LINES {
        return Err(DocumentError::Invalid(format!(
            "Prescription exceeds {MAX_PRESCRIPTION_LINES} medicines"
        )));
    }
    for line in &request.lines {
        if line.name.trim().is_empty() {
            return Err(DocumentError::Invalid("Medicine name is required".into()));
        }
        if let Some(ref dosage) = line.dosage {
            if dosage.len() > 100 {
                return Err(DocumentError::Invalid(
                    "Dosage is too long (max 100 characters)".into(),
                ));
            }
        }
    }
    Ok(())
}

/// Render a prescription to PDF bytes.
pub fn generate_prescription_pdf(
    request: &PrescriptionRequest,
    prescriber: &str,
) -> Result<Vec<u8>, DocumentError> {
    validate(request)?;

    let (doc, page1, layer1) = PdfDocument::new("Prescription", Mm(210.0), Mm(297.0), "Layer 1");
    let layer = doc.get_page(page1).get_layer(layer1);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| DocumentError::Render(format!("PDF font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| DocumentError::Render(format!("PDF font error: {e}")))?;
    let courier = doc
        .add_builtin_font(BuiltinFont::Courier)
        .map_err(|e| DocumentError::Render(format!("PDF font error: {e}")))?;

    let mut y = Mm(280.0);

    // Letterhead
    layer.use_text(CLINIC_NAME, 16.0, Mm(20.0), y, &bold);
    y -= Mm(6.0);
    layer.use_text(CLINIC_SUBTITLE, 10.0, Mm(20.0), y, &font);
    y -= Mm(4.5);
    layer.use_text(CLINIC_ADDRESS, 9.0, Mm(20.0), y, &font);
    y -= Mm(4.5);
    layer.use_text(CLINIC_CONTACT, 9.0, Mm(20.0), y, &font);
    y -= Mm(8.0);

    // Patient block
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    layer.use_text(
        format!("Patient: {}", request.patient_name.trim()),
        10.0,
        Mm(20.0),
        y,
        &font,
    );
    let age = request
        .patient_age
        .map(|a| a.to_string())
        .unwrap_or_else(|| "—".to_string());
    layer.use_text(format!("Age: {age}"), 10.0, Mm(140.0), y, &font);
    y -= Mm(5.0);
    layer.use_text(format!("Date: {date}"), 10.0, Mm(140.0), y, &font);
    if let Some(ref address) = request.address {
        layer.use_text(format!("Address: {address}"), 10.0, Mm(20.0), y, &font);
    }
    y -= Mm(5.0);
    if let Some(ref diagnosis) = request.diagnosis {
        layer.use_text(format!("Diagnosis: {diagnosis}"), 10.0, Mm(20.0), y, &font);
        y -= Mm(5.0);
    }
    y -= Mm(5.0);

    // Medicine table
    layer.use_text("PRESCRIPTION:", 12.0, Mm(20.0), y, &bold);
    y -= Mm(6.0);
    layer.use_text(
        "  #  MEDICINE                        RISK    DOSAGE          SCHEDULE  DAYS",
        8.0,
        Mm(20.0),
        y,
        &courier,
    );
    y -= Mm(5.0);
    for (i, line) in request.lines.iter().enumerate() {
        let duration = line
            .duration_days
            .map(|d| d.to_string())
            .unwrap_or_default();
        let text = format!(
            "  {:<2} {:<31} {:<7} {:<15} {:<9} {}",
            i + 1,
            truncate(line.name.trim(), 31),
            line.risk_level.as_str().to_uppercase(),
            truncate(line.dosage.as_deref().unwrap_or(""), 15),
            line.schedule(),
            duration
        );
        layer.use_text(&text, 8.0, Mm(20.0), y, &courier);
        y -= Mm(4.5);
    }

    // Footer + signature
    y -= Mm(10.0);
    for wrapped in wrap_text(FOOTER_NOTE, 90) {
        layer.use_text(&wrapped, 8.0, Mm(20.0), y, &font);
        y -= Mm(4.0);
    }
    y -= Mm(10.0);
    layer.use_text(
        format!("Doctor's Signature: ____________________ ({prescriber})"),
        10.0,
        Mm(110.0),
        y,
        &font,
    );

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| DocumentError::Render(format!("PDF save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| DocumentError::Render(format!("PDF buffer error: {e}")))
}

/// Save PDF bytes under the exports directory.
pub fn export_pdf_to_file(
    pdf_bytes: &[u8],
    filename: &str,
    exports_dir: &Path,
) -> Result<PathBuf, DocumentError> {
    std::fs::create_dir_all(exports_dir)
        .map_err(|e| DocumentError::Io(format!("Cannot create exports dir: {e}")))?;

    let path = exports_dir.join(filename);
    std::fs::write(&path, pdf_bytes)
        .map_err(|e| DocumentError::Io(format!("Cannot write PDF: {e}")))?;

    Ok(path)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars.saturating_sub(1)).collect::<String>() + "…"
    }
}

/// Simple word-wrap helper for PDF text rendering.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> PrescriptionRequest {
        PrescriptionRequest {
            patient_name: "A. Patient".into(),
            patient_age: Some(44),
            address: Some("12 Ward Lane".into()),
            diagnosis: Some("Seasonal allergy".into()),
            lines: vec![
                PrescriptionLine {
                    name: "LOW DOSE ASPIRIN".into(),
                    risk_level: RiskLevel::Low,
                    dosage: Some("75mg".into()),
                    morning: true,
                    afternoon: false,
                    night: true,
                    duration_days: Some(14),
                },
                PrescriptionLine {
                    name: "XOLAIR PFS".into(),
                    risk_level: RiskLevel::Low,
                    dosage: None,
                    morning: false,
                    afternoon: true,
                    night: false,
                    duration_days: None,
                },
            ],
        }
    }

    #[test]
    fn generates_a_pdf() {
        let bytes = generate_prescription_pdf(&sample_request(), "Dr. A").unwrap();
        assert!(bytes.len() > 500);
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn schedule_renders_in_m_a_n_order() {
        let line = &sample_request().lines[0];
        assert_eq!(line.schedule(), "M N");
    }

    #[test]
    fn rejects_empty_patient_name() {
        let mut request = sample_request();
        request.patient_name = "   ".into();
        assert!(matches!(
            generate_prescription_pdf(&request, "Dr. A"),
            Err(DocumentError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_empty_and_oversized_line_lists() {
        let mut request = sample_request();
        request.lines.clear();
        assert!(validate(&request).is_err());

        request.lines = (0..MAX_PRESCRIPTION_LINES + 1)
            .map(|i| PrescriptionLine {
                name: format!("MED {i}"),
                risk_level: RiskLevel::Low,
                dosage: None,
                morning: true,
                afternoon: false,
                night: false,
                duration_days: None,
            })
            .collect();
        assert!(validate(&request).is_err());
    }

    #[test]
    fn rejects_blank_medicine_name() {
        let mut request = sample_request();
        request.lines[0].name = "".into();
        assert!(validate(&request).is_err());
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = generate_prescription_pdf(&sample_request(), "Dr. A").unwrap();
        let path = export_pdf_to_file(&bytes, "prescription.pdf", dir.path()).unwrap();
        assert!(path.exists());
        assert_eq!(std::fs::read(path).unwrap(), bytes);
    }
}
