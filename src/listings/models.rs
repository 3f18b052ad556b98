use serde::Serialize;
use serde_json::Value;

// Output shape consumed by the front end:
//  id, price, address          -> display strings
//  beds, baths, sqft, lot, year -> upstream scalar (number or string), "" when absent
//  features                    -> list of bullet points
//  brochureUrl, idxUrl         -> links

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedListing {
    pub id: String,
    pub price: String,
    pub address: String,
    pub beds: Value,
    pub baths: Value,
    pub sqft: Value,
    pub lot: Value,
    pub year: Value,
    pub features: Vec<Value>,
    pub brochure_url: String,
    pub idx_url: String,
}
