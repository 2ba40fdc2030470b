use super::AnalysisError;
use crate::catalog::CatalogLookup;
use crate::models::AnalysisResult;
use crate::selection::SelectionState;

/// Build one composite result per selected symptom, in selection order.
///
/// Each symptom is resolved by id and then joined by name against the five
/// reference tables. A table with no rows for the name contributes an empty
/// list. Condition order is the source-table order; nothing is re-ranked.
///
/// # Errors
///
/// - [`AnalysisError::NoSymptomsSelected`] if the selection is empty
/// - [`AnalysisError::UnknownSymptomId`] if a selected id is missing from the
///   catalog (ids only ever come from the catalog, so this is an internal bug)
pub fn analyze(
    catalog: &impl CatalogLookup,
    selection: &SelectionState,
) -> Result<Vec<AnalysisResult>, AnalysisError> {
    if selection.is_empty() {
        return Err(AnalysisError::NoSymptomsSelected);
    }

    selection
        .ids()
        .iter()
        .map(|&id| {
            let Some(symptom) = catalog.symptom(id) else {
                tracing::error!(id = %id, "Selection references a symptom missing from the catalog");
                return Err(AnalysisError::UnknownSymptomId(id));
            };
            let name = symptom.name.as_str();

            Ok(AnalysisResult {
                symptom_id: id,
                name: symptom.name.clone(),
                category: symptom.category.clone(),
                severity: selection.severity(id),
                conditions: catalog.conditions(name).to_vec(),
                products: catalog.products(name).to_vec(),
                devices: catalog.devices(name).to_vec(),
                tests: catalog.tests(name).to_vec(),
                tips: catalog.tips(name).to_vec(),
            })
        })
        .collect()
}
