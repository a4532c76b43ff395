/// Arrow schema definitions for permit lead data.
pub mod permits {
    use std::sync::Arc;

    use arrow::array::{ArrayRef, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::error::ArrowError;
    use arrow::record_batch::RecordBatch;

    use crate::record::{PERMIT_FIELD_COUNT, PermitRecord};

    /// Column headings in positional order, as they appear on the lead sheet.
    pub const COLUMNS: [&str; PERMIT_FIELD_COUNT] = [
        "Property Address",
        "Owner Contact",
        "Project Type",
        "Square Footage",
        "Permit Issue Date",
        "Contractor Name",
    ];

    /// Schema for a batch of permit records. Every column is non-null text.
    pub fn permit_schema() -> Schema {
        Schema::new(
            COLUMNS
                .iter()
                .map(|name| Field::new(*name, DataType::Utf8, false))
                .collect::<Vec<_>>(),
        )
    }

    /// Convert records into a single RecordBatch, one row per record.
    pub fn records_to_batch(records: &[PermitRecord]) -> Result<RecordBatch, ArrowError> {
        let columns: Vec<ArrayRef> = (0..PERMIT_FIELD_COUNT)
            .map(|col| {
                let values: Vec<&str> = records.iter().map(|r| r.fields()[col]).collect();
                Arc::new(StringArray::from(values)) as ArrayRef
            })
            .collect();
        RecordBatch::try_new(Arc::new(permit_schema()), columns)
    }
}

#[cfg(test)]
mod tests {
    use super::permits;
    use crate::record::PermitRecord;
    use arrow::array::{Array, StringArray};

    #[test]
    fn permit_schema_has_expected_fields() {
        let schema = permits::permit_schema();
        assert_eq!(schema.fields().len(), 6);
        assert!(schema.field_with_name("Project Type").is_ok());
        assert!(schema.field_with_name("Contractor Name").is_ok());
    }

    #[test]
    fn records_to_batch_keeps_row_order() {
        let records = vec![
            PermitRecord::from_cells(&["123 Main St", "John Doe", "Remodel", "1500", "d", "c"])
                .unwrap(),
            PermitRecord::from_cells(&["456 Ocean Dr", "Jane Smith", "New Construction", "2400", "d", "c"])
                .unwrap(),
        ];
        let batch = permits::records_to_batch(&records).unwrap();
        assert_eq!(batch.num_rows(), 2);
        let types = batch
            .column_by_name("Project Type")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(types.value(0), "Remodel");
        assert_eq!(types.value(1), "New Construction");
        assert_eq!(types.null_count(), 0);
    }

    #[test]
    fn empty_batch_is_valid() {
        let batch = permits::records_to_batch(&[]).unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 6);
    }
}
