// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog of the routes the portfolio API exposes.

use crate::draft::Method;

/// A catalog entry. `path` is relative to `/api`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub method: Method,
    pub description: &'static str,
}

pub static ROUTES: [Route; 6] = [
    Route {
        path: "/about",
        method: Method::Get,
        description: "Personal information & goals",
    },
    Route {
        path: "/experience",
        method: Method::Get,
        description: "Work experience & internships",
    },
    Route {
        path: "/projects",
        method: Method::Get,
        description: "Technical projects",
    },
    Route {
        path: "/skills",
        method: Method::Get,
        description: "Technologies & proficiencies",
    },
    Route {
        path: "/achievements",
        method: Method::Get,
        description: "Awards & accomplishments",
    },
    Route {
        path: "/contact",
        method: Method::Post,
        description: "Create contact with params, body & docs",
    },
];

/// Look up a route by path. A leading `/` is optional.
pub fn find(path: &str) -> Option<&'static Route> {
    let path = path.trim();
    ROUTES
        .iter()
        .find(|r| r.path == path || r.path.strip_prefix('/') == Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_is_the_only_write_route() {
        let writes: Vec<_> = ROUTES.iter().filter(|r| r.method.is_write()).collect();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].path, "/contact");
    }

    #[test]
    fn find_accepts_bare_names() {
        assert_eq!(find("skills").unwrap().path, "/skills");
        assert_eq!(find("/about").unwrap().method, Method::Get);
        assert!(find("/nope").is_none());
    }
}
