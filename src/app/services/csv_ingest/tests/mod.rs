//! Test fixtures for the CSV ingestion filter

use super::column_mapping::ColumnMapping;
use csv::StringRecord;

mod column_mapping_tests;

/// Export with Turkish headers, a BOM, quoted cells and every kind of row
pub fn create_test_csv() -> String {
    [
        "\u{feff}İl,İlçe,Büyüklük,Derinlik,Tarih,Saat,Enlem,Boylam",
        "İSTANBUL,Kadıköy,\"4,2\",\"7,5\",15.01.2024,14:30:00,\"40,98\",\"29,02\"",
        "Kayseri,Talas,3.1,5.0,15.01.2024,13:00:00,38.70,35.50",
        "Bursa,,2.5,,2024-01-14,09:15,40.18,29.06",
        "Kocaeli,İzmit,,10.0,2024-01-14,08:00:00,40.76,29.94",
        "\"Sakarya, Merkez\",Adapazarı,3.3,8.0,2024-01-13,22:45:10,40.78,30.40",
        ",Gebze,2.0,5.0,2024-01-13,21:00:00,40.80,29.43",
        "Yalova,Çınarcık,12.0,5.0,2024-01-13,20:00:00,40.64,29.12",
    ]
    .join("\n")
}

pub fn create_mapping(headers: &[&str]) -> ColumnMapping {
    ColumnMapping::analyze(&StringRecord::from(headers.to_vec()))
}
