//! Fragment to document path resolution.
//!
//! The routing convention maps a fragment onto the document root:
//!
//! | Fragment        | Resource path                  | Target  |
//! |-----------------|--------------------------------|---------|
//! | (empty)         | `public/home.md`               | `home`  |
//! | `404`           | `public/404.md`                | `404`   |
//! | `about`         | `public/about.md`              | `about` |
//! | `blog/0001`     | `public/blogs/0001.md`         | `blog`  |
//! | `work/PoE/001`  | `public/works/PoEs/001.md`     | `work`  |
//!
//! Directory segments are pluralized, a lone segment is not.

use serde::{Deserialize, Serialize};

/// A fragment resolved to the document to load and the region to show it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRoute {
    pub resource_path: String,
    pub display_target_id: String,
    pub canonical_fragment: String,
}

/// Routing convention: document root plus the two well-known fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    pub document_root: String,
    pub home_fragment: String,
    pub not_found_fragment: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self { document_root: "public".into(), home_fragment: "home".into(), not_found_fragment: "404".into() }
    }
}

impl RouteTable {
    /// Resolve a fragment (without the leading `#`). Performs no I/O.
    pub fn resolve(&self, fragment: &str) -> ResolvedRoute {
        if fragment.is_empty() {
            return self.single(&self.home_fragment);
        }
        if fragment == self.not_found_fragment {
            return self.not_found_route(&self.not_found_fragment);
        }

        let segments: Vec<&str> = fragment.split('/').collect();
        match segments.split_last() {
            Some((file, dirs)) if !dirs.is_empty() => {
                let mut path = format!("{}/", self.document_root);
                for dir in dirs {
                    path.push_str(dir);
                    path.push_str("s/");
                }
                path.push_str(file);
                path.push_str(".md");

                ResolvedRoute {
                    resource_path: path,
                    display_target_id: dirs[0].to_string(),
                    canonical_fragment: fragment.to_string(),
                }
            }
            _ => self.single(fragment),
        }
    }

    /// Route that loads the not-found document into `display_target_id`.
    pub fn not_found_route(&self, display_target_id: &str) -> ResolvedRoute {
        ResolvedRoute {
            resource_path: self.not_found_path(),
            display_target_id: display_target_id.to_string(),
            canonical_fragment: self.not_found_fragment.clone(),
        }
    }

    /// Resource path of the not-found document.
    pub fn not_found_path(&self) -> String {
        format!("{}/{}.md", self.document_root, self.not_found_fragment)
    }

    fn single(&self, segment: &str) -> ResolvedRoute {
        ResolvedRoute {
            resource_path: format!("{}/{}.md", self.document_root, segment),
            display_target_id: segment.to_string(),
            canonical_fragment: segment.to_string(),
        }
    }
}
