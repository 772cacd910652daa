// Institution names that do not match the rankings table verbatim.

use std::collections::{HashMap, HashSet};

/// Institutions that are not part of the rankings at all.
pub const ABSENT: [&str; 35] = [
    "Bocconi School of Management",
    "CPES Paris Sciences & Lettres + Lycée Henri-IV",
    "California College of the Arts",
    "EDHEC Business School",
    "EM Lyon",
    "ENSA School of Architecture",
    "ESCP Europe",
    "ESSEC School of Management",
    "Ecole du Louvre",
    "Ecole hôtelière de Lausanne",
    "HTW Berlin",
    "Hospitality Management School of The Hague",
    "IESEG School of Management",
    "INSA Lyon",
    "ISIPCA Paris",
    "ISTR Lyon",
    "Institut d'Administration des Entreprises",
    "LUISS Guido Carli",
    "Liverpool Hope University",
    "Maastricht University",
    "Middlebury College",
    "Musashino Art University",
    "München Universität",
    "Olivier de Serres",
    "Penninghen Institute of Art and Design",
    "United International Business Schools",
    "University of California",
    "University of Global Business",
    "University of Mechelen",
    "University of Toronto Scarborough",
    "University of the Arts London",
    "Université Libre",
    "Université René Descartes -Paris-V",
    "Universités de Technologie",
    "Vatel International Hospitality Management School",
];

/// Alternate spellings, mapped to the name used in the rankings table.
///
/// Some targets carry the stray whitespace of the workbook (a trailing space, a
/// non-breaking space); they must stay byte-exact.
pub const ALIASES: [(&str, &str); 21] = [
    (
        "Bachelor of the Ecole Polytechnique",
        "Institut Polytechnique de Paris",
    ),
    ("Cambridge University", "University of Cambridge"),
    (
        "Ecole Polytechnique Fédérale de Lausanne",
        "University of Lausanne",
    ),
    (
        "Eidgenössische Technische Hochschule Zürich",
        "ETH Zurich - Swiss Federal Institute of Technology",
    ),
    (
        "Ferrandi International Hospitality Management School",
        "Universita' degli Studi di Ferrara",
    ),
    ("Imperial College", "Imperial College London"),
    ("Kingston University London", "Kingston University, London"),
    (
        "London School of Economics",
        "The London School of Economics and Political Science (LSE)",
    ),
    ("Mc Gill University", "McGill University"),
    ("Sciences-Po Paris", "Sciences Po "),
    (
        "The University of British Columbia",
        "University of British Columbia",
    ),
    ("University College London", "UCL"),
    ("University College of London", "UCL"),
    ("University of Gröningen", "University of Groningen"),
    ("University of Rotterdam", "Erasmus University Rotterdam "),
    (
        "Università Cattolica del Sacro Cuore",
        "Università\u{a0}Cattolica del Sacro Cuore",
    ),
    (
        "Université d'Assas -Paris-II",
        "University Paris 2 Panthéon-Assas",
    ),
    (
        "Université de Louvain",
        "Université catholique de Louvain (UCLouvain)",
    ),
    ("Université de Montréal", "Université de Montréal "),
    ("Universités de Paris La Sorbonne", "Sorbonne University"),
    ("Warwick University", "The University of Warwick"),
];

/// The absence set and alias table used when a name is not found in the rankings.
///
/// The default value holds the static [ABSENT] and [ALIASES] tables. Extra entries can
/// be layered on top; they never replace a static alias.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct NameReconciler {
    absent: HashSet<String>,
    aliases: HashMap<String, String>,
}

impl Default for NameReconciler {
    fn default() -> Self {
        NameReconciler {
            absent: ABSENT.iter().map(|s| s.to_string()).collect(),
            aliases: ALIASES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl NameReconciler {
    pub fn with_extra(
        self,
        extra_absent: &[String],
        extra_aliases: &[(String, String)],
    ) -> NameReconciler {
        let mut res = self;
        res.absent.extend(extra_absent.iter().cloned());
        for (k, v) in extra_aliases.iter() {
            res.aliases.entry(k.clone()).or_insert_with(|| v.clone());
        }
        res
    }

    pub fn is_absent(&self, name: &str) -> bool {
        self.absent.contains(name)
    }

    /// The name to use in the rankings table instead of `name`, if any.
    pub fn canonical_name(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(|s| s.as_str())
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn absent_names(&self) -> impl Iterator<Item = &str> {
        self.absent.iter().map(|s| s.as_str())
    }
}
