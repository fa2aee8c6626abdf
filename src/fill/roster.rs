//! Target institutions, grouped by country.
//!
//! The built-in roster mirrors the hand-curated list the workbook is meant to
//! compare; a custom roster with the same JSON shape can be supplied instead.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};

/// One roster line: an institution and its public entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub city: String,
    pub url: String,
}

/// Institutions of one country, in priority order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryGroup {
    pub country: String,
    pub universities: Vec<RosterEntry>,
}

/// A roster entry resolved into the form the extractors consume: stable id,
/// location, and country-derived hints.
#[derive(Debug, Clone, PartialEq)]
pub struct Institution {
    pub id: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub url: String,
    pub language: String,
    pub currency: String,
}

/// Loads a custom roster from a JSON file.
pub fn from_file(path: &Path) -> Result<Vec<CountryGroup>> {
    let source = fs::read_to_string(path)?;
    let roster: Vec<CountryGroup> = serde_json::from_str(&source)?;
    if roster.iter().all(|group| group.universities.is_empty()) {
        return Err(ToolError::InvalidSchema(format!(
            "roster '{}' lists no institutions",
            path.display()
        )));
    }
    Ok(roster)
}

/// Flattens a roster into institutions. Ids follow roster order, so repeated
/// runs over the same roster produce the same ids.
pub fn institutions(roster: &[CountryGroup]) -> Vec<Institution> {
    let mut resolved = Vec::new();
    for group in roster {
        for entry in &group.universities {
            let ordinal = resolved.len() + 1;
            resolved.push(Institution {
                id: format!("UNIV{ordinal:03}"),
                name: entry.name.clone(),
                city: entry.city.clone(),
                country: group.country.clone(),
                url: entry.url.clone(),
                language: country_language(&group.country).to_string(),
                currency: country_currency(&group.country).to_string(),
            });
        }
    }
    resolved
}

fn country_language(country: &str) -> &'static str {
    match country {
        "United States" | "United Kingdom" => "English",
        "Canada" => "English/French",
        "Spain" | "Mexico" | "Chile" => "Spanish",
        "Germany" => "German",
        "Switzerland" => "German/French/Italian",
        "Netherlands" => "Dutch/English",
        _ => "N/A",
    }
}

fn country_currency(country: &str) -> &'static str {
    match country {
        "United States" => "USD",
        "United Kingdom" => "GBP",
        "Canada" => "CAD",
        "Spain" | "Germany" | "Netherlands" => "EUR",
        "Switzerland" => "CHF",
        "Mexico" => "MXN",
        "Chile" => "CLP",
        _ => "N/A",
    }
}

fn group(country: &str, universities: &[(&str, &str, &str)]) -> CountryGroup {
    CountryGroup {
        country: country.to_string(),
        universities: universities
            .iter()
            .map(|(name, city, url)| RosterEntry {
                name: name.to_string(),
                city: city.to_string(),
                url: url.to_string(),
            })
            .collect(),
    }
}

/// The built-in roster of candidate universities.
pub fn default_roster() -> Vec<CountryGroup> {
    vec![
        group(
            "United States",
            &[
                (
                    "Massachusetts Institute of Technology",
                    "Cambridge",
                    "https://www.mit.edu",
                ),
                ("Stanford University", "Stanford", "https://www.stanford.edu"),
                (
                    "University of California, Berkeley",
                    "Berkeley",
                    "https://www.berkeley.edu",
                ),
                ("Carnegie Mellon University", "Pittsburgh", "https://www.cmu.edu"),
                ("Cornell University", "Ithaca", "https://www.cornell.edu"),
            ],
        ),
        group(
            "Spain",
            &[
                (
                    "Universidad Politécnica de Madrid",
                    "Madrid",
                    "https://www.upm.es",
                ),
                (
                    "Universidad Complutense de Madrid",
                    "Madrid",
                    "https://www.ucm.es",
                ),
                (
                    "Universidad Politécnica de Cataluña",
                    "Barcelona",
                    "https://www.upc.edu",
                ),
                ("Universidad de Barcelona", "Barcelona", "https://www.ub.edu"),
                ("Universidad de Granada", "Granada", "https://www.ugr.es"),
            ],
        ),
        group(
            "United Kingdom",
            &[
                ("University of Oxford", "Oxford", "https://www.ox.ac.uk"),
                ("University of Cambridge", "Cambridge", "https://www.cam.ac.uk"),
                (
                    "Imperial College London",
                    "London",
                    "https://www.imperial.ac.uk",
                ),
                ("University College London", "London", "https://www.ucl.ac.uk"),
                ("University of Edinburgh", "Edinburgh", "https://www.ed.ac.uk"),
            ],
        ),
        group(
            "Canada",
            &[
                ("University of Toronto", "Toronto", "https://www.utoronto.ca"),
                ("University of Waterloo", "Waterloo", "https://uwaterloo.ca"),
                (
                    "University of British Columbia",
                    "Vancouver",
                    "https://www.ubc.ca",
                ),
                ("McGill University", "Montreal", "https://www.mcgill.ca"),
                ("University of Alberta", "Edmonton", "https://www.ualberta.ca"),
            ],
        ),
        group(
            "Germany",
            &[
                (
                    "Technical University of Munich",
                    "Munich",
                    "https://www.tum.de/en",
                ),
                (
                    "RWTH Aachen University",
                    "Aachen",
                    "https://www.rwth-aachen.de/go/id/a/",
                ),
                (
                    "Karlsruhe Institute of Technology",
                    "Karlsruhe",
                    "https://www.kit.edu/english/",
                ),
                (
                    "Heidelberg University",
                    "Heidelberg",
                    "https://www.uni-heidelberg.de/en",
                ),
                (
                    "Ludwig Maximilian University of Munich",
                    "Munich",
                    "https://www.lmu.de/en/",
                ),
            ],
        ),
        group(
            "Switzerland",
            &[
                ("ETH Zurich", "Zurich", "https://ethz.ch/en.html"),
                ("EPFL", "Lausanne", "https://www.epfl.ch/en/"),
                ("University of Zurich", "Zurich", "https://www.uzh.ch/en.html"),
                ("University of Geneva", "Geneva", "https://www.unige.ch/en/"),
                (
                    "Università della Svizzera italiana",
                    "Lugano",
                    "https://www.usi.ch/en",
                ),
            ],
        ),
        group(
            "Netherlands",
            &[
                (
                    "Delft University of Technology",
                    "Delft",
                    "https://www.tudelft.nl/en/",
                ),
                ("University of Amsterdam", "Amsterdam", "https://www.uva.nl/en"),
                (
                    "Eindhoven University of Technology",
                    "Eindhoven",
                    "https://www.tue.nl/en/",
                ),
                ("Leiden University", "Leiden", "https://www.universiteitleiden.nl/en"),
                ("Utrecht University", "Utrecht", "https://www.uu.nl/en"),
            ],
        ),
        group(
            "Mexico",
            &[
                (
                    "Universidad Nacional Autónoma de México",
                    "Ciudad de México",
                    "https://www.unam.mx/",
                ),
                (
                    "Instituto Tecnológico y de Estudios Superiores de Monterrey",
                    "Monterrey",
                    "https://tec.mx/en",
                ),
                (
                    "Instituto Politécnico Nacional",
                    "Ciudad de México",
                    "https://www.ipn.mx/",
                ),
                (
                    "Universidad Iberoamericana",
                    "Ciudad de México",
                    "https://ibero.mx/english",
                ),
                (
                    "Universidad Autónoma Metropolitana",
                    "Ciudad de México",
                    "http://www.uam.mx/",
                ),
            ],
        ),
        group(
            "Chile",
            &[
                (
                    "Pontificia Universidad Católica de Chile",
                    "Santiago",
                    "https://www.uc.cl/en",
                ),
                ("Universidad de Chile", "Santiago", "https://www.uchile.cl/english"),
                (
                    "Universidad de Santiago de Chile",
                    "Santiago",
                    "https://www.usach.cl/english",
                ),
                (
                    "Universidad Adolfo Ibáñez",
                    "Viña del Mar",
                    "https://www.uai.cl/en/",
                ),
                (
                    "Universidad Técnica Federico Santa María",
                    "Valparaíso",
                    "https://www.usm.cl/en/",
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roster_covers_nine_countries() {
        let roster = default_roster();
        assert_eq!(roster.len(), 9);
        assert!(roster.iter().all(|group| group.universities.len() == 5));
    }

    #[test]
    fn institutions_get_sequential_ids_and_country_hints() {
        let resolved = institutions(&default_roster());
        assert_eq!(resolved.len(), 45);
        assert_eq!(resolved[0].id, "UNIV001");
        assert_eq!(resolved[44].id, "UNIV045");
        assert_eq!(resolved[0].language, "English");
        assert_eq!(resolved[0].currency, "USD");

        let eth = resolved
            .iter()
            .find(|institution| institution.name == "ETH Zurich")
            .expect("ETH in roster");
        assert_eq!(eth.country, "Switzerland");
        assert_eq!(eth.currency, "CHF");
        assert_eq!(eth.language, "German/French/Italian");
    }

    #[test]
    fn roster_round_trips_through_json() {
        let roster = default_roster();
        let json = serde_json::to_string(&roster).expect("roster serialises");
        let restored: Vec<CountryGroup> = serde_json::from_str(&json).expect("roster deserialises");
        assert_eq!(roster, restored);
    }
}
