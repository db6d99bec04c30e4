use serde::{Deserialize, Serialize};

/// One deforestation observation in canonical form.
///
/// Field names carry the wire spelling via serde renames so the
/// serialized keys match the upload protocol exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "pais")]
    pub country: String,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "año")]
    pub year: i64,
    #[serde(rename = "perdida_de_bosques_en_hectareas")]
    pub forest_loss_ha: f64,
}

impl Record {
    pub fn new(
        country: impl Into<String>,
        code: impl Into<String>,
        year: i64,
        forest_loss_ha: f64,
    ) -> Result<Self, String> {
        let country = country.into().trim().to_string();
        if country.is_empty() {
            return Err("country must not be empty".to_string());
        }
        let code = code.into().trim().to_string();
        if code.is_empty() {
            return Err("territory code must not be empty".to_string());
        }
        if !forest_loss_ha.is_finite() {
            return Err(format!("forest loss '{forest_loss_ha}' is not a finite number"));
        }
        if forest_loss_ha < 0.0 {
            return Err(format!("forest loss {forest_loss_ha} must not be negative"));
        }
        Ok(Self {
            country,
            code,
            year,
            forest_loss_ha,
        })
    }
}

/// Ordered sequence of records from one loaded file. Row order matches
/// the source file and is preserved through serialization; it carries
/// no semantic ranking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl IntoIterator for Dataset {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
