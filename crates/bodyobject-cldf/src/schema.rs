//! Column layout of every emitted table and the `cldf-metadata.json` that
//! describes them.

use serde_json::{json, Value as JsonValue};

pub const TERMS: &str = "http://cldf.clld.org/v1.0/terms.rdf#";

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub datatype: &'static str,
    /// CLDF term the column maps to, if any.
    pub term: Option<&'static str>,
    pub separator: Option<&'static str>,
}

const fn col(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        datatype: "string",
        term: None,
        separator: None,
    }
}

const fn term(name: &'static str, term: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        datatype: "string",
        term: Some(term),
        separator: None,
    }
}

const fn int(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        datatype: "integer",
        term: None,
        separator: None,
    }
}

const fn float(name: &'static str, term: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        datatype: "decimal",
        term: Some(term),
        separator: None,
    }
}

const fn list(name: &'static str, term: Option<&'static str>, separator: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        datatype: "string",
        term,
        separator: Some(separator),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ForeignKeySpec {
    pub column: &'static str,
    pub table: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub url: &'static str,
    /// CLDF component name; `None` for custom tables.
    pub component: Option<&'static str>,
    pub columns: &'static [ColumnSpec],
    pub foreign_keys: &'static [ForeignKeySpec],
}

impl TableSpec {
    pub fn header(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    pub fn to_json(&self) -> JsonValue {
        let columns: Vec<JsonValue> = self
            .columns
            .iter()
            .map(|c| {
                let mut column = json!({ "name": c.name, "datatype": c.datatype });
                if let Some(term) = c.term {
                    column["propertyUrl"] = json!(format!("{TERMS}{term}"));
                }
                if let Some(separator) = c.separator {
                    column["separator"] = json!(separator);
                }
                if c.name == "ID" {
                    column["required"] = json!(true);
                }
                column
            })
            .collect();
        let foreign_keys: Vec<JsonValue> = self
            .foreign_keys
            .iter()
            .map(|fk| {
                json!({
                    "columnReference": [fk.column],
                    "reference": { "resource": fk.table, "columnReference": ["ID"] }
                })
            })
            .collect();

        let mut table = json!({
            "url": self.url,
            "tableSchema": {
                "columns": columns,
                "primaryKey": ["ID"],
                "foreignKeys": foreign_keys,
            }
        });
        if let Some(component) = self.component {
            table["dc:conformsTo"] = json!(format!("{TERMS}{component}"));
        }
        table
    }
}

pub const LANGUAGES: TableSpec = TableSpec {
    url: "languages.csv",
    component: Some("LanguageTable"),
    columns: &[
        term("ID", "id"),
        term("Name", "name"),
        term("Glottocode", "glottocode"),
        term("Dataset", "contributionReference"),
        float("Latitude", "latitude"),
        float("Longitude", "longitude"),
        col("Subgroup"),
        col("Family"),
        int("Forms"),
        int("FormsWithSounds"),
        int("Concepts"),
        col("Incollections"),
    ],
    foreign_keys: &[ForeignKeySpec {
        column: "Dataset",
        table: "contributions.csv",
    }],
};

pub const PARAMETERS: TableSpec = TableSpec {
    url: "parameters.csv",
    component: Some("ParameterTable"),
    columns: &[
        term("ID", "id"),
        term("Name", "name"),
        term("Description", "description"),
        col("Bodypart"),
        col("Object"),
        int("Count"),
    ],
    foreign_keys: &[],
};

pub const CODES: TableSpec = TableSpec {
    url: "codes.csv",
    component: Some("CodeTable"),
    columns: &[
        term("ID", "id"),
        term("Parameter_ID", "parameterReference"),
        term("Name", "name"),
        term("Description", "description"),
    ],
    foreign_keys: &[ForeignKeySpec {
        column: "Parameter_ID",
        table: "parameters.csv",
    }],
};

pub const VALUES: TableSpec = TableSpec {
    url: "values.csv",
    component: Some("ValueTable"),
    columns: &[
        term("ID", "id"),
        term("Language_ID", "languageReference"),
        term("Parameter_ID", "parameterReference"),
        term("Value", "value"),
        term("Code_ID", "codeReference"),
        list("Example_IDs", Some("exampleReference"), ";"),
    ],
    foreign_keys: &[
        ForeignKeySpec {
            column: "Language_ID",
            table: "languages.csv",
        },
        ForeignKeySpec {
            column: "Parameter_ID",
            table: "parameters.csv",
        },
        ForeignKeySpec {
            column: "Code_ID",
            table: "codes.csv",
        },
    ],
};

pub const EXAMPLES: TableSpec = TableSpec {
    url: "examples.csv",
    component: Some("ExampleTable"),
    columns: &[
        term("ID", "id"),
        term("Language_ID", "languageReference"),
        term("Primary_Text", "primaryText"),
        term("Gloss", "gloss"),
    ],
    foreign_keys: &[ForeignKeySpec {
        column: "Language_ID",
        table: "languages.csv",
    }],
};

pub const CONTRIBUTIONS: TableSpec = TableSpec {
    url: "contributions.csv",
    component: Some("ContributionTable"),
    columns: &[
        term("ID", "id"),
        term("Name", "name"),
        term("Citation", "citation"),
        list("Collection_IDs", None, " "),
        int("Glottocodes"),
        int("Doculects"),
        int("Concepts"),
        int("Senses"),
        int("Forms"),
    ],
    foreign_keys: &[ForeignKeySpec {
        column: "Collection_IDs",
        table: "collections.csv",
    }],
};

pub const COLLECTIONS: TableSpec = TableSpec {
    url: "collections.csv",
    component: None,
    columns: &[
        col("ID"),
        col("Name"),
        col("Description"),
        int("Varieties"),
        int("Glottocodes"),
        int("Concepts"),
        int("Forms"),
    ],
    foreign_keys: &[],
};

/// The full metadata document for the given tables.
pub fn metadata_json(dataset_id: &str, tables: &[&TableSpec]) -> JsonValue {
    json!({
        "@context": ["http://www.w3.org/ns/csvw", { "@language": "en" }],
        "dc:conformsTo": format!("{TERMS}StructureDataset"),
        "rdf:ID": dataset_id,
        "rdf:type": "http://www.w3.org/ns/dcat#Distribution",
        "dialect": { "commentPrefix": null },
        "tables": tables.iter().map(|t| t.to_json()).collect::<Vec<_>>(),
    })
}
