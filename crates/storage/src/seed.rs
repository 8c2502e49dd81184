use shared::domain::{Address, BeneficiaryId, BeneficiaryRecord};

struct SeedRow {
    id: &'static str,
    name: &'static str,
    surname: &'static str,
    identity_number: &'static str,
    university: &'static str,
    accumulated_total: u64,
    year_of_completion: i32,
    tax_number: Option<&'static str>,
    city: &'static str,
}

const SEED: &[SeedRow] = &[
    SeedRow {
        id: "1",
        name: "John",
        surname: "Doe",
        identity_number: "123456789",
        university: "University of Botswana",
        accumulated_total: 50_000,
        year_of_completion: 2022,
        tax_number: Some("TAX123456"),
        city: "Gaborone",
    },
    SeedRow {
        id: "2",
        name: "Neo",
        surname: "Kgosi",
        identity_number: "224518903",
        university: "Botswana International University of Science and Technology",
        accumulated_total: 72_500,
        year_of_completion: 2021,
        tax_number: None,
        city: "Palapye",
    },
    SeedRow {
        id: "3",
        name: "Mpho",
        surname: "Sebego",
        identity_number: "318827461",
        university: "University of Botswana",
        accumulated_total: 41_200,
        year_of_completion: 2023,
        tax_number: None,
        city: "Gaborone",
    },
    SeedRow {
        id: "4",
        name: "Lesego",
        surname: "Molefe",
        identity_number: "402917735",
        university: "Botswana Accountancy College",
        accumulated_total: 38_750,
        year_of_completion: 2020,
        tax_number: None,
        city: "Francistown",
    },
    SeedRow {
        id: "5",
        name: "Kagiso",
        surname: "Tau",
        identity_number: "517263048",
        university: "University of Cape Town",
        accumulated_total: 120_000,
        year_of_completion: 2019,
        tax_number: Some("TAX517263"),
        city: "Maun",
    },
    SeedRow {
        id: "6",
        name: "Onalenna",
        surname: "Dube",
        identity_number: "608145592",
        university: "Limkokwing University",
        accumulated_total: 29_900,
        year_of_completion: 2022,
        tax_number: None,
        city: "Gaborone",
    },
    SeedRow {
        id: "7",
        name: "Tumelo",
        surname: "Ramotswe",
        identity_number: "713390184",
        university: "University of Botswana",
        accumulated_total: 55_300,
        year_of_completion: 2021,
        tax_number: None,
        city: "Lobatse",
    },
    SeedRow {
        id: "8",
        name: "Boitumelo",
        surname: "Seretse",
        identity_number: "826601457",
        university: "University of the Witwatersrand",
        accumulated_total: 98_450,
        year_of_completion: 2020,
        tax_number: None,
        city: "Serowe",
    },
    SeedRow {
        id: "9",
        name: "Keabetswe",
        surname: "Modise",
        identity_number: "934472210",
        university: "Botswana Open University",
        accumulated_total: 18_000,
        year_of_completion: 2024,
        tax_number: None,
        city: "Kasane",
    },
    SeedRow {
        id: "10",
        name: "Thato",
        surname: "Mogae",
        identity_number: "105538826",
        university: "Botswana International University of Science and Technology",
        accumulated_total: 64_100,
        year_of_completion: 2023,
        tax_number: None,
        city: "Palapye",
    },
    SeedRow {
        id: "11",
        name: "Refilwe",
        surname: "Khama",
        identity_number: "116684092",
        university: "University of Botswana",
        accumulated_total: 47_650,
        year_of_completion: 2022,
        tax_number: None,
        city: "Gaborone",
    },
    SeedRow {
        id: "12",
        name: "Oratile",
        surname: "Masire",
        identity_number: "127709315",
        university: "Ba Isago University",
        accumulated_total: 33_400,
        year_of_completion: 2021,
        tax_number: None,
        city: "Molepolole",
    },
    SeedRow {
        id: "13",
        name: "Tebogo",
        surname: "Nkwe",
        identity_number: "138825671",
        university: "University of Pretoria",
        accumulated_total: 110_250,
        year_of_completion: 2018,
        tax_number: Some("TAX138825"),
        city: "Francistown",
    },
    SeedRow {
        id: "14",
        name: "Goitseone",
        surname: "Phiri",
        identity_number: "149902348",
        university: "University of Botswana",
        accumulated_total: 52_800,
        year_of_completion: 2024,
        tax_number: None,
        city: "Mahalapye",
    },
];

/// Built-in directory contents used when no seed file is configured.
pub fn seed_records() -> Vec<BeneficiaryRecord> {
    SEED.iter().map(to_record).collect()
}

fn to_record(row: &SeedRow) -> BeneficiaryRecord {
    BeneficiaryRecord {
        id: BeneficiaryId::new(row.id),
        name: row.name.to_string(),
        surname: row.surname.to_string(),
        identity_number: row.identity_number.to_string(),
        university: row.university.to_string(),
        accumulated_total: row.accumulated_total,
        year_of_completion: row.year_of_completion,
        tax_number: row.tax_number.map(str::to_string),
        image_url: format!("https://images.example.org/beneficiaries/{}.jpg", row.id),
        email: format!(
            "{}.{}@example.org",
            row.name.to_ascii_lowercase(),
            row.surname.to_ascii_lowercase()
        ),
        address: Address {
            street: format!("Plot {}", &row.identity_number[..4]),
            city: row.city.to_string(),
            postal_code: "0000".to_string(),
            country: "Botswana".to_string(),
        },
    }
}
