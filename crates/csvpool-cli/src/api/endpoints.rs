//! URL construction for Kaggle API endpoints

/// Dataset keyword search endpoint
pub fn datasets_list_url(base_url: &str) -> String {
    format!("{}/datasets/list", base_url)
}

/// Dataset archive download endpoint
pub fn dataset_download_url(base_url: &str, owner: &str, slug: &str) -> String {
    format!("{}/datasets/download/{}/{}", base_url, owner, slug)
}
