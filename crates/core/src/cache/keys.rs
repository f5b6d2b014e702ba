/// Returns the cache key for a user's repository listing.
///
/// Pagination is not part of the key: every page requested for the same user
/// shares one entry, so a cached page is served for any later page request
/// until it expires.
pub fn repositories_key(username: &str) -> String {
    username.to_string()
}

/// Returns the cache key for a repository's commit listing.
pub fn commits_key(username: &str, repository: &str) -> String {
    format!("{}/{}", username, repository)
}
