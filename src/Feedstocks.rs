/// Feedstock record: proximate, ultimate and chemical analysis data with
/// basis conversions (as-determined, as-received, dry, dry ash-free, CHO)
/// and lumped experimental yields.
pub mod feedstock;

/// Biomass composition characterization: from the C and H mass fractions of
/// the dry ash-free feedstock and the splitting parameters, compute the mass
/// fractions of the structural lumps (cellulose, hemicellulose, lignins,
/// tannins, triglycerides).
pub mod biocomp;

/// Feedstock library loaded from a JSON file, with lookup by name and
/// tabular summaries.
pub mod feedstock_lib_api;
