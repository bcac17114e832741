use serde::Serialize;

/// One application form the wizard can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PathwayType {
    pub pathway: &'static str,
    pub pdf_type: &'static str,
    pub family_type: &'static str,
    pub full_name: &'static str,
    pub app_type: &'static str,
}

/// Static lookup table between pathway keys, PDF form codes and display names.
///
/// Lookups by pathway, full name or application type require a unique row;
/// lookups by PDF type take the first row, since several pathways may print
/// onto the same form.
#[derive(Debug)]
pub struct PathwayTypeCatalog {
    types: Vec<PathwayType>,
}

impl PathwayTypeCatalog {
    pub fn standard() -> Self {
        Self {
            types: standard_pathway_types(),
        }
    }

    pub fn types(&self) -> &[PathwayType] {
        &self.types
    }

    fn unique_by(&self, matches: impl Fn(&PathwayType) -> bool) -> Option<&PathwayType> {
        let mut found = self.types.iter().filter(|row| matches(row));
        let first = found.next()?;
        match found.next() {
            Some(_) => None,
            None => Some(first),
        }
    }

    fn first_by(&self, matches: impl Fn(&PathwayType) -> bool) -> Option<&PathwayType> {
        self.types.iter().find(|row| matches(row))
    }

    pub fn by_pathway(&self, pathway: &str) -> Option<&PathwayType> {
        self.unique_by(|row| row.pathway == pathway)
    }

    pub fn by_pdf_type(&self, pdf_type: &str) -> Option<&PathwayType> {
        self.first_by(|row| row.pdf_type == pdf_type)
    }

    pub fn pdf_type(&self, pathway: &str) -> Option<&'static str> {
        self.by_pathway(pathway).map(|row| row.pdf_type)
    }

    pub fn family_type(&self, pathway: &str) -> Option<&'static str> {
        self.by_pathway(pathway).map(|row| row.family_type)
    }

    pub fn full_name_for_pdf_type(&self, pdf_type: &str) -> Option<&'static str> {
        self.by_pdf_type(pdf_type).map(|row| row.full_name)
    }

    pub fn family_type_for_pdf_type(&self, pdf_type: &str) -> Option<&'static str> {
        self.by_pdf_type(pdf_type).map(|row| row.family_type)
    }

    /// Full name of an order whose pathway key is `order` followed by `specific`,
    /// e.g. `agreementEnfrc` + `26`.
    pub fn full_order_name(&self, order: &str, specific: &str) -> Option<&'static str> {
        let pathway = format!("{order}{specific}");
        self.by_pathway(&pathway).map(|row| row.full_name)
    }

    /// Comma-joined application types for the given full names. Unknown or
    /// ambiguous names are skipped.
    pub fn app_types_for_full_names<S: AsRef<str>>(&self, full_names: &[S]) -> String {
        full_names
            .iter()
            .filter_map(|name| self.unique_by(|row| row.full_name == name.as_ref()))
            .map(|row| row.app_type)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn family_types_for_full_names<S: AsRef<str>>(&self, full_names: &[S]) -> Vec<&'static str> {
        full_names
            .iter()
            .filter_map(|name| self.unique_by(|row| row.full_name == name.as_ref()))
            .map(|row| row.family_type)
            .collect()
    }

    pub fn full_names_for_app_types<S: AsRef<str>>(&self, app_types: &[S]) -> Vec<&'static str> {
        app_types
            .iter()
            .filter_map(|app_type| self.unique_by(|row| row.app_type == app_type.as_ref()))
            .map(|row| row.full_name)
            .collect()
    }
}

fn standard_pathway_types() -> Vec<PathwayType> {
    vec![
        PathwayType {
            pathway: "needPO",
            pdf_type: "AAP",
            family_type: "protectionOrder",
            full_name: "Application About a Protection Order",
            app_type: "PO",
        },
        PathwayType {
            pathway: "changePO",
            pdf_type: "APO",
            family_type: "protectionOrder",
            full_name: "Application to Change a Protection Order",
            app_type: "CPO",
        },
        PathwayType {
            pathway: "terminatePO",
            pdf_type: "APO",
            family_type: "protectionOrder",
            full_name: "Application to Terminate a Protection Order",
            app_type: "TPO",
        },
        PathwayType {
            pathway: "familyLawMatter",
            pdf_type: "FLC",
            family_type: "familyLawMatter",
            full_name: "Application About a Family Law Matter",
            app_type: "FLM",
        },
        PathwayType {
            pathway: "replyFlm",
            pdf_type: "RFLM",
            family_type: "replyFlm",
            full_name: "Reply to an Application About a Family Law Matter",
            app_type: "RFLM",
        },
        PathwayType {
            pathway: "writtenResponse",
            pdf_type: "WRA",
            family_type: "writtenResponse",
            full_name: "Written Response to Application",
            app_type: "WR",
        },
        PathwayType {
            pathway: "priorityParenting",
            pdf_type: "PPM",
            family_type: "priorityParenting",
            full_name: "Application About Priority Parenting Matter",
            app_type: "PPM",
        },
        PathwayType {
            pathway: "childReloc",
            pdf_type: "RELOC",
            family_type: "childReloc",
            full_name: "Application for Order Prohibiting the Relocation of a Child",
            app_type: "RELOC",
        },
        PathwayType {
            pathway: "caseMgmt",
            pdf_type: "ACMO",
            family_type: "caseMgmt",
            full_name: "Application for Case Management Order",
            app_type: "CM",
        },
        PathwayType {
            pathway: "caseMgmtWithoutNotice",
            pdf_type: "AXCMO",
            family_type: "caseMgmt",
            full_name: "Application for Case Management Order Without Notice or Attendance",
            app_type: "CMWN",
        },
        PathwayType {
            pathway: "agreementEnfrc",
            pdf_type: "AEFA",
            family_type: "agreementEnfrc",
            full_name: "Application About Enforcement",
            app_type: "ENF",
        },
        PathwayType {
            pathway: "agreementEnfrc26",
            pdf_type: "RFA",
            family_type: "agreementEnfrc",
            full_name: "Request to File an Agreement",
            app_type: "AGR",
        },
        PathwayType {
            pathway: "agreementEnfrc27",
            pdf_type: "RDET",
            family_type: "agreementEnfrc",
            full_name: "Request to File a Determination of Parenting Coordinator",
            app_type: "DET",
        },
        PathwayType {
            pathway: "agreementEnfrc28",
            pdf_type: "RFO",
            family_type: "agreementEnfrc",
            full_name: "Request to File an Order",
            app_type: "ORD",
        },
    ]
}
