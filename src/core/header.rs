use crate::constants::{FIELD_SEPARATOR, FIXED_COLUMNS};

/// Ordered sample names; order defines the output column order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariantHeader {
    samples: Vec<String>,
}

impl VariantHeader {
    pub fn new(samples: Vec<String>) -> Self {
        VariantHeader { samples }
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Table header: the fixed columns followed by one column per sample.
    pub fn project(&self) -> String {
        let mut line = FIXED_COLUMNS.join(FIELD_SEPARATOR);
        for sample in &self.samples {
            line.push_str(FIELD_SEPARATOR);
            line.push_str(sample);
        }
        line.push('\n');
        line
    }
}
