use colored::*;

use webdeck_common::service::ServiceRecord;

use crate::terminal::colors;

type Detail = (String, ColoredString);

pub fn service_to_details(record: &ServiceRecord) -> Vec<Detail> {
    vec![
        ("Port".to_string(), record.port.to_string().color(colors::ACCENT)),
        ("Link".to_string(), record.link.color(colors::LINK)),
        ("Icon".to_string(), record.icon.color(colors::TEXT_DEFAULT)),
    ]
}
