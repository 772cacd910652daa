/*!
Sample lists of destination institutions, used by the command line tool.

They mix names that appear verbatim in the rankings, names that only resolve
through the alias table and names known to be missing from the rankings (see
[crate::NameReconciler]), so that every lookup path is exercised.
*/

pub const BST_DESTINATIONS: &[&str] = &[
    "Bocconi School of Management",
    "Cambridge University",
    "Durham University",
    "EDHEC Business School",
    "ESCP Europe",
    "ESSEC School of Management",
    "Ecole hôtelière de Lausanne",
    "Eidgenössische Technische Hochschule Zürich",
    "IESEG School of Management",
    "Imperial College",
    "King's College London",
    "Kingston University London",
    "LUISS Guido Carli",
    "London School of Economics",
    "Maastricht University",
    "Mc Gill University",
    "Sciences-Po Paris",
    "The University of British Columbia",
    "UCL",
    "University College London",
    "University of Amsterdam",
    "University of Bath",
    "University of Bristol",
    "University of Exeter",
    "University of Gröningen",
    "University of Oxford",
    "University of Rotterdam",
    "University of Toronto",
    "University of the Arts London",
    "Université de Louvain",
    "Warwick University",
];

pub const LFIT_DESTINATIONS: &[&str] = &[
    "Bachelor of the Ecole Polytechnique",
    "CPES Paris Sciences & Lettres + Lycée Henri-IV",
    "California College of the Arts",
    "EM Lyon",
    "ENSA School of Architecture",
    "Ecole Polytechnique Fédérale de Lausanne",
    "Ecole du Louvre",
    "Ferrandi International Hospitality Management School",
    "HTW Berlin",
    "Hospitality Management School of The Hague",
    "INSA Lyon",
    "ISIPCA Paris",
    "ISTR Lyon",
    "Institut d'Administration des Entreprises",
    "Liverpool Hope University",
    "Middlebury College",
    "Musashino Art University",
    "München Universität",
    "Olivier de Serres",
    "Penninghen Institute of Art and Design",
    "Sciences-Po Paris",
    "United International Business Schools",
    "University College of London",
    "University of California",
    "University of Global Business",
    "University of Mechelen",
    "University of Toronto Scarborough",
    "Università Cattolica del Sacro Cuore",
    "Université Libre",
    "Université René Descartes -Paris-V",
    "Université d'Assas -Paris-II",
    "Université de Montréal",
    "Universités de Paris La Sorbonne",
    "Universités de Technologie",
    "Vatel International Hospitality Management School",
];
