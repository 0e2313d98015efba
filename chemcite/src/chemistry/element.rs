use serde::{Deserialize, Serialize};

/// The mass of a single electron in Dalton
pub const ELECTRON_MASS: f64 = 5.485_799_090_65e-4;

macro_rules! elements {
    ($($variant:ident $symbol:literal $mass:literal $doc:literal),+ $(,)?) => {
        /// An element from the closed lookup table, each with the mass of its most abundant isotope
        #[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
        pub enum Element {
            $(
                #[doc = $doc]
                $variant,
            )+
        }

        impl Element {
            /// All elements in the lookup table
            pub const ALL: &[Self] = &[$(Self::$variant),+];

            /// The symbol as used in molecular formulas
            pub const fn symbol(self) -> &'static str {
                match self {
                    $(Self::$variant => $symbol,)+
                }
            }

            /// The monoisotopic mass in Dalton, defined as the mass of the most abundant isotope
            pub const fn monoisotopic_mass(self) -> f64 {
                match self {
                    $(Self::$variant => $mass,)+
                }
            }
        }
    };
}

elements!(
    H "H" 1.007_825_032_07 "Hydrogen",
    D "D" 2.014_101_777_8 "Deuterium, the heavy hydrogen isotope is often written separately in formulas",
    Li "Li" 7.016_004_55 "Lithium",
    Be "Be" 9.012_182_2 "Beryllium",
    B "B" 11.009_305_4 "Boron (¹¹B)",
    C "C" 12.0 "Carbon",
    N "N" 14.003_074_004_8 "Nitrogen",
    O "O" 15.994_914_619_56 "Oxygen",
    F "F" 18.998_403_22 "Fluorine",
    Na "Na" 22.989_769_280_9 "Sodium",
    Mg "Mg" 23.985_041_7 "Magnesium",
    Al "Al" 26.981_538_63 "Aluminium",
    Si "Si" 27.976_926_532_5 "Silicon",
    P "P" 30.973_761_63 "Phosphorus",
    S "S" 31.972_071 "Sulfur",
    Cl "Cl" 34.968_852_68 "Chlorine (³⁵Cl)",
    K "K" 38.963_706_68 "Potassium",
    Ca "Ca" 39.962_590_98 "Calcium",
    Sc "Sc" 44.955_911_9 "Scandium",
    Ti "Ti" 47.947_946_3 "Titanium (⁴⁸Ti)",
    V "V" 50.943_959_5 "Vanadium",
    Cr "Cr" 51.940_507_5 "Chromium (⁵²Cr)",
    Mn "Mn" 54.938_045_1 "Manganese",
    Fe "Fe" 55.934_937_5 "Iron (⁵⁶Fe)",
    Co "Co" 58.933_195 "Cobalt",
    Ni "Ni" 57.935_342_9 "Nickel (⁵⁸Ni)",
    Cu "Cu" 62.929_597_5 "Copper (⁶³Cu)",
    Zn "Zn" 63.929_142_2 "Zinc (⁶⁴Zn)",
    Ga "Ga" 68.925_573_6 "Gallium (⁶⁹Ga)",
    Ge "Ge" 73.921_177_8 "Germanium (⁷⁴Ge)",
    As "As" 74.921_596_5 "Arsenic",
    Se "Se" 79.916_521_3 "Selenium (⁸⁰Se)",
    Br "Br" 78.918_337_1 "Bromine (⁷⁹Br)",
    Rb "Rb" 84.911_789_738 "Rubidium (⁸⁵Rb)",
    Sr "Sr" 87.905_612_1 "Strontium (⁸⁸Sr)",
    Y "Y" 88.905_848_3 "Yttrium",
    Zr "Zr" 89.904_704_4 "Zirconium (⁹⁰Zr)",
    Mo "Mo" 97.905_408_2 "Molybdenum (⁹⁸Mo)",
    Ru "Ru" 101.904_349_3 "Ruthenium (¹⁰²Ru)",
    Rh "Rh" 102.905_504 "Rhodium",
    Pd "Pd" 105.903_486 "Palladium (¹⁰⁶Pd)",
    Ag "Ag" 106.905_097 "Silver (¹⁰⁷Ag)",
    Cd "Cd" 113.903_358_5 "Cadmium (¹¹⁴Cd)",
    In "In" 114.903_878 "Indium (¹¹⁵In)",
    Sn "Sn" 119.902_194_7 "Tin (¹²⁰Sn)",
    Sb "Sb" 120.903_815_7 "Antimony (¹²¹Sb)",
    Te "Te" 129.906_224_4 "Tellurium (¹³⁰Te)",
    I "I" 126.904_473 "Iodine",
    Cs "Cs" 132.905_451_933 "Caesium",
    Ba "Ba" 137.905_247_2 "Barium (¹³⁸Ba)",
    W "W" 183.950_931_2 "Tungsten (¹⁸⁴W)",
    Os "Os" 191.961_480_7 "Osmium (¹⁹²Os)",
    Ir "Ir" 192.962_926_4 "Iridium (¹⁹³Ir)",
    Pt "Pt" 194.964_791_1 "Platinum (¹⁹⁵Pt)",
    Au "Au" 196.966_568_7 "Gold",
    Hg "Hg" 201.970_643 "Mercury (²⁰²Hg)",
    Tl "Tl" 204.974_427_5 "Thallium (²⁰⁵Tl)",
    Pb "Pb" 207.976_652_1 "Lead (²⁰⁸Pb)",
    Bi "Bi" 208.980_398_7 "Bismuth",
);

/// All element symbols sorted so that two letter symbols are tried before their one letter prefix
pub const ELEMENT_PARSE_LIST: &[(&str, Element)] = &[
    ("Li", Element::Li),
    ("Be", Element::Be),
    ("Na", Element::Na),
    ("Mg", Element::Mg),
    ("Al", Element::Al),
    ("Si", Element::Si),
    ("Cl", Element::Cl),
    ("Ca", Element::Ca),
    ("Sc", Element::Sc),
    ("Ti", Element::Ti),
    ("Cr", Element::Cr),
    ("Mn", Element::Mn),
    ("Fe", Element::Fe),
    ("Co", Element::Co),
    ("Ni", Element::Ni),
    ("Cu", Element::Cu),
    ("Zn", Element::Zn),
    ("Ga", Element::Ga),
    ("Ge", Element::Ge),
    ("As", Element::As),
    ("Se", Element::Se),
    ("Br", Element::Br),
    ("Rb", Element::Rb),
    ("Sr", Element::Sr),
    ("Zr", Element::Zr),
    ("Mo", Element::Mo),
    ("Ru", Element::Ru),
    ("Rh", Element::Rh),
    ("Pd", Element::Pd),
    ("Ag", Element::Ag),
    ("Cd", Element::Cd),
    ("In", Element::In),
    ("Sn", Element::Sn),
    ("Sb", Element::Sb),
    ("Te", Element::Te),
    ("Cs", Element::Cs),
    ("Ba", Element::Ba),
    ("Os", Element::Os),
    ("Ir", Element::Ir),
    ("Pt", Element::Pt),
    ("Au", Element::Au),
    ("Hg", Element::Hg),
    ("Tl", Element::Tl),
    ("Pb", Element::Pb),
    ("Bi", Element::Bi),
    ("H", Element::H),
    ("D", Element::D),
    ("B", Element::B),
    ("C", Element::C),
    ("N", Element::N),
    ("O", Element::O),
    ("F", Element::F),
    ("P", Element::P),
    ("S", Element::S),
    ("K", Element::K),
    ("V", Element::V),
    ("Y", Element::Y),
    ("I", Element::I),
    ("W", Element::W),
];

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::str::FromStr for Element {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ELEMENT_PARSE_LIST
            .iter()
            .find(|(symbol, _)| *symbol == s)
            .map(|(_, element)| *element)
            .ok_or(())
    }
}
