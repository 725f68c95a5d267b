// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: Copyright The Lance Authors

//! Type mapping from Glue (Hive) column types to Arrow data types.

use std::sync::Arc;

use arrow_schema::{DataType, Field, Schema, SchemaRef, TimeUnit};

use crate::error::{CatalogResult, TypeMappingSnafu};
use crate::models::ColumnMetadata;

/// Hive's default for a bare `decimal`.
const DEFAULT_DECIMAL: (u8, i8) = (10, 0);

/// Map a Glue `Type` string to an Arrow `DataType`.
///
/// Case-insensitive. Parameterized forms such as `varchar(255)` and
/// `decimal(10,2)` are accepted.
pub fn glue_type_to_arrow(type_name: &str) -> CatalogResult<DataType> {
    let normalized = type_name.trim().to_lowercase();
    let base = normalized
        .split(['(', '<'])
        .next()
        .unwrap_or_default()
        .trim();

    match base {
        "boolean" => Ok(DataType::Boolean),

        "tinyint" => Ok(DataType::Int8),
        "smallint" => Ok(DataType::Int16),
        "int" | "integer" => Ok(DataType::Int32),
        "bigint" => Ok(DataType::Int64),

        "float" => Ok(DataType::Float32),
        "double" => Ok(DataType::Float64),

        "decimal" => {
            let (precision, scale) = decimal_params(&normalized).unwrap_or(DEFAULT_DECIMAL);
            Ok(DataType::Decimal128(precision, scale))
        }

        "string" | "varchar" | "char" => Ok(DataType::Utf8),
        "binary" => Ok(DataType::Binary),

        "date" => Ok(DataType::Date32),
        "timestamp" => Ok(DataType::Timestamp(TimeUnit::Microsecond, None)),

        // Nested types are kept as JSON strings.
        "array" | "map" | "struct" | "uniontype" => Ok(DataType::Utf8),

        _ => TypeMappingSnafu {
            message: format!("Unsupported Glue type: '{}'", type_name),
        }
        .fail(),
    }
}

fn decimal_params(normalized: &str) -> Option<(u8, i8)> {
    let inner = normalized
        .split_once('(')?
        .1
        .strip_suffix(')')?;
    let (precision, scale) = match inner.split_once(',') {
        Some((p, s)) => (p.trim().parse().ok()?, s.trim().parse().ok()?),
        None => (inner.trim().parse().ok()?, 0),
    };
    Some((precision, scale))
}

/// Convert a slice of [`ColumnMetadata`] to an Arrow [`Schema`].
///
/// Fields follow `ordinal_position`. Glue records no nullability, so every
/// field is nullable.
pub fn columns_to_arrow_schema(columns: &[ColumnMetadata]) -> CatalogResult<SchemaRef> {
    let mut sorted: Vec<&ColumnMetadata> = columns.iter().collect();
    sorted.sort_by_key(|c| c.ordinal_position);

    let fields: Vec<Field> = sorted
        .iter()
        .map(|col| {
            let data_type = glue_type_to_arrow(&col.data_type)?;
            Ok(Field::new(&col.name, data_type, true))
        })
        .collect::<CatalogResult<Vec<_>>>()?;

    Ok(Arc::new(Schema::new(fields)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_type_mappings() {
        assert_eq!(glue_type_to_arrow("boolean").unwrap(), DataType::Boolean);
        assert_eq!(glue_type_to_arrow("tinyint").unwrap(), DataType::Int8);
        assert_eq!(glue_type_to_arrow("smallint").unwrap(), DataType::Int16);
        assert_eq!(glue_type_to_arrow("int").unwrap(), DataType::Int32);
        assert_eq!(glue_type_to_arrow("bigint").unwrap(), DataType::Int64);
        assert_eq!(glue_type_to_arrow("float").unwrap(), DataType::Float32);
        assert_eq!(glue_type_to_arrow("double").unwrap(), DataType::Float64);
        assert_eq!(glue_type_to_arrow("string").unwrap(), DataType::Utf8);
        assert_eq!(glue_type_to_arrow("binary").unwrap(), DataType::Binary);
        assert_eq!(glue_type_to_arrow("date").unwrap(), DataType::Date32);
        assert_eq!(
            glue_type_to_arrow("timestamp").unwrap(),
            DataType::Timestamp(TimeUnit::Microsecond, None)
        );
    }

    #[test]
    fn test_parameterized_types() {
        assert_eq!(glue_type_to_arrow("varchar(255)").unwrap(), DataType::Utf8);
        assert_eq!(glue_type_to_arrow("char(3)").unwrap(), DataType::Utf8);
        assert_eq!(
            glue_type_to_arrow("decimal(12, 4)").unwrap(),
            DataType::Decimal128(12, 4)
        );
        assert_eq!(
            glue_type_to_arrow("decimal(18)").unwrap(),
            DataType::Decimal128(18, 0)
        );
        assert_eq!(
            glue_type_to_arrow("decimal").unwrap(),
            DataType::Decimal128(10, 0)
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(glue_type_to_arrow("BIGINT").unwrap(), DataType::Int64);
        assert_eq!(glue_type_to_arrow("VarChar(10)").unwrap(), DataType::Utf8);
    }

    #[test]
    fn test_complex_types_fallback_to_utf8() {
        assert_eq!(glue_type_to_arrow("array<string>").unwrap(), DataType::Utf8);
        assert_eq!(
            glue_type_to_arrow("map<string,int>").unwrap(),
            DataType::Utf8
        );
        assert_eq!(
            glue_type_to_arrow("struct<a:int,b:array<string>>").unwrap(),
            DataType::Utf8
        );
    }

    #[test]
    fn test_unsupported_type() {
        let err = glue_type_to_arrow("geometry").unwrap_err();
        assert!(err.to_string().contains("geometry"));
    }

    #[test]
    fn test_columns_sorted_by_ordinal_position() {
        let columns = vec![
            ColumnMetadata::new("ds", None, "string", 2),
            ColumnMetadata::new("id", None, "bigint", 0),
            ColumnMetadata::new("amount", Some("in cents".into()), "decimal(10,2)", 1),
        ];
        let schema = columns_to_arrow_schema(&columns).unwrap();
        assert_eq!(schema.fields().len(), 3);
        assert_eq!(schema.field(0).name(), "id");
        assert_eq!(*schema.field(0).data_type(), DataType::Int64);
        assert_eq!(schema.field(1).name(), "amount");
        assert_eq!(*schema.field(1).data_type(), DataType::Decimal128(10, 2));
        assert_eq!(schema.field(2).name(), "ds");
        assert!(schema.fields().iter().all(|f| f.is_nullable()));
    }

    #[test]
    fn test_empty_columns() {
        let schema = columns_to_arrow_schema(&[]).unwrap();
        assert_eq!(schema.fields().len(), 0);
    }
}
