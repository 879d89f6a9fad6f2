use crate::domain::Empresa;

pub struct CsvExporter;

impl CsvExporter {
    /// Writes the currently displayed collection to a CSV file with a
    /// header row using the wire field names.
    pub fn export_empresas(empresas: &[Empresa], filename: &str) -> Result<String, String> {
        let mut writer = csv::Writer::from_path(filename).map_err(|e| e.to_string())?;

        writer
            .write_record([
                "id",
                "name",
                "description",
                "creationDate",
                "isActive",
                "revenue",
                "stockPercentage",
            ])
            .map_err(|e| e.to_string())?;

        for empresa in empresas {
            writer
                .write_record([
                    empresa.id.to_string().as_str(),
                    empresa.name.as_str(),
                    empresa.description.as_str(),
                    empresa.creation_date.as_str(),
                    if empresa.is_active { "true" } else { "false" },
                    empresa.revenue.as_str(),
                    empresa.stock_percentage.as_str(),
                ])
                .map_err(|e| e.to_string())?;
        }

        writer.flush().map_err(|e| e.to_string())?;
        Ok(filename.to_string())
    }
}
