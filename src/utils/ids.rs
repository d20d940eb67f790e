/// Builds the stable user id a submission is filed under: lowercased name
/// with spaces collapsed to underscores, joined to the phone number.
pub fn generate_user_id(name: &str, phone: &str) -> String {
    let clean_name = name.trim().to_lowercase().replace(' ', "_");
    format!("{}_{}", clean_name, phone)
}
