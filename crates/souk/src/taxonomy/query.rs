use thiserror::Error;

use crate::taxonomy::{Breadcrumb, CategoryPath, TaxonomyNode, TaxonomyStore};

/// A category path that does not resolve to a category.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[error("category not found: '{path}'")]
pub struct NotFound {
    pub path: CategoryPath,
}

/// The reason a category cannot have a listing attached to it.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum SelectCategoryError {
    #[error(transparent)]
    NotFound(#[from] NotFound),

    #[error("category '{path}' has subcategories; choose one of them instead")]
    NotSelectable { path: CategoryPath },
}

impl TaxonomyStore {
    /// Returns the category at the given path.
    ///
    /// The empty path does not address any category.
    pub fn get_node<S: AsRef<str>>(&self, path: &[S]) -> Result<&TaxonomyNode, NotFound> {
        self.trail(path)?
            .pop()
            .ok_or_else(|| NotFound {
                path: CategoryPath::from_segments(path),
            })
    }

    /// Returns the immediate subcategories of the category at the given path,
    /// in definition order.
    pub fn list_children<S: AsRef<str>>(
        &self,
        path: &[S],
    ) -> Result<Vec<(&str, &TaxonomyNode)>, NotFound> {
        Ok(self.get_node(path)?.children().collect())
    }

    /// Returns whether a listing can be attached to the category at the given path.
    pub fn is_selectable<S: AsRef<str>>(&self, path: &[S]) -> bool {
        self.get_node(path).is_ok_and(TaxonomyNode::is_leaf)
    }

    /// Returns the names of the categories leading to the given path.
    pub fn breadcrumb<S: AsRef<str>>(&self, path: &[S]) -> Result<Breadcrumb<'_>, NotFound> {
        let trail = self.trail(path)?;

        Ok(Breadcrumb(trail.into_iter().map(TaxonomyNode::name).collect()))
    }

    /// Returns the category at the given path if a listing can be attached to it.
    pub fn select<S: AsRef<str>>(&self, path: &[S]) -> Result<&TaxonomyNode, SelectCategoryError> {
        let node = self.get_node(path)?;
        if !node.is_leaf() {
            return Err(SelectCategoryError::NotSelectable {
                path: CategoryPath::from_segments(path),
            });
        }

        Ok(node)
    }

    /// Returns every category in the taxonomy with its path, depth-first in
    /// definition order.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            stack: self
                .roots
                .iter()
                .rev()
                .map(|(key, node)| (CategoryPath::empty().child(key.as_str()), node))
                .collect(),
        }
    }

    /// Returns every category listings can be attached to, depth-first in
    /// definition order.
    pub fn leaves(&self) -> Vec<(CategoryPath, &TaxonomyNode)> {
        self.nodes().filter(|(_, node)| node.is_leaf()).collect()
    }

    /// Returns the paths of every category with the given key.
    pub fn find_by_key(&self, key: &str) -> Vec<CategoryPath> {
        self.nodes()
            .filter(|(_, node)| node.key() == key)
            .map(|(path, _)| path)
            .collect()
    }

    /// Returns the total number of categories.
    pub fn len(&self) -> usize {
        self.nodes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Returns the length of the longest path in the taxonomy.
    pub fn max_depth(&self) -> usize {
        self.nodes().map(|(path, _)| path.len()).max().unwrap_or(0)
    }

    /// Resolves each segment of the path in turn, returning the categories
    /// visited from the root down.
    fn trail<S: AsRef<str>>(&self, path: &[S]) -> Result<Vec<&TaxonomyNode>, NotFound> {
        let not_found = || NotFound {
            path: CategoryPath::from_segments(path),
        };

        let (root_key, rest) = path.split_first().ok_or_else(not_found)?;
        let mut node = self.roots.get(root_key.as_ref()).ok_or_else(not_found)?;

        let mut trail = Vec::with_capacity(path.len());
        trail.push(node);

        for key in rest {
            node = node.child(key.as_ref()).ok_or_else(not_found)?;
            trail.push(node);
        }

        Ok(trail)
    }
}

/// A depth-first iterator over the categories of a [`TaxonomyStore`].
pub struct Nodes<'a> {
    stack: Vec<(CategoryPath, &'a TaxonomyNode)>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = (CategoryPath, &'a TaxonomyNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, node) = self.stack.pop()?;

        let children = node.children().collect::<Vec<_>>();
        for (key, child) in children.into_iter().rev() {
            self.stack.push((path.child(key), child));
        }

        Some((path, node))
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    const CITY_BUS: [&str; 4] = ["motors", "heavy-vehicles", "buses", "city-bus"];

    fn marketplace() -> TaxonomyStore {
        TaxonomyStore::embedded().unwrap()
    }

    fn small_taxonomy() -> TaxonomyStore {
        TaxonomyStore::from_toml_str(indoc! {r#"
            [motors]
            name = "Motors"

            [motors.subcategories.cars]
            name = "Cars"
            isLeaf = true

            [motors.subcategories.parts]
            name = "Parts"

            [motors.subcategories.parts.subcategories.tyres]
            name = "Tyres"
            isLeaf = true

            [motors.subcategories.parts.subcategories.batteries]
            name = "Batteries"
            isLeaf = true

            [jobs]
            name = "Jobs"
            isLeaf = true
        "#})
        .unwrap()
    }

    #[test]
    fn test_get_root_node() {
        let store = marketplace();

        let motors = store.get_node(&["motors"]).unwrap();

        assert_eq!(motors.name(), "Motors");
        assert!(!motors.is_leaf());
        assert!(motors.child("heavy-vehicles").is_some());
    }

    #[test]
    fn test_get_leaf_node() {
        let store = marketplace();

        let city_bus = store.get_node(&CITY_BUS).unwrap();

        assert_eq!(city_bus.name(), "City Bus");
        assert!(city_bus.is_leaf());
        assert!(store.is_selectable(&CITY_BUS));
    }

    #[test]
    fn test_get_missing_node() {
        let store = marketplace();

        assert_eq!(
            store.get_node(&["motors", "bogus-key"]),
            Err(NotFound {
                path: CategoryPath::from(["motors", "bogus-key"])
            })
        );
        assert_eq!(
            store.get_node(&["bogus-key"]),
            Err(NotFound {
                path: CategoryPath::from(["bogus-key"])
            })
        );
    }

    #[test]
    fn test_get_node_with_empty_path() {
        let store = marketplace();
        let path: [&str; 0] = [];

        assert_eq!(
            store.get_node(&path),
            Err(NotFound {
                path: CategoryPath::empty()
            })
        );
        assert!(!store.is_selectable(&path));
        assert!(store.breadcrumb(&path).is_err());
    }

    #[test]
    fn test_descending_past_a_leaf_is_not_found() {
        let store = marketplace();

        assert!(store
            .get_node(&["motors", "heavy-vehicles", "buses", "city-bus", "seats"])
            .is_err());
    }

    #[test]
    fn test_get_node_with_owned_path() {
        let store = marketplace();
        let path = "motors/heavy-vehicles/buses".parse::<CategoryPath>().unwrap();

        assert_eq!(store.get_node(&path).unwrap().name(), "Buses");
    }

    #[test]
    fn test_list_children_of_leaf_is_empty() {
        let store = marketplace();

        assert_eq!(
            store
                .list_children(&["classifieds", "furniture"])
                .unwrap()
                .len(),
            0
        );
    }

    #[test]
    fn test_list_children_in_definition_order() {
        let store = small_taxonomy();

        assert_eq!(
            store
                .list_children(&["motors", "parts"])
                .unwrap()
                .into_iter()
                .map(|(key, node)| (key, node.name()))
                .collect::<Vec<_>>(),
            vec![("tyres", "Tyres"), ("batteries", "Batteries")]
        );
    }

    #[test]
    fn test_list_children_of_missing_path() {
        let store = marketplace();

        assert_eq!(
            store.list_children(&["motors", "bogus-key"]),
            Err(NotFound {
                path: CategoryPath::from(["motors", "bogus-key"])
            })
        );
    }

    #[test]
    fn test_breadcrumb() {
        let store = marketplace();

        let breadcrumb = store.breadcrumb(&CITY_BUS).unwrap();

        assert_eq!(
            breadcrumb.to_vec(),
            vec!["Motors", "Heavy Vehicles", "Buses", "City Bus"]
        );
    }

    #[test]
    fn test_breadcrumb_matches_every_prefix() {
        let store = marketplace();

        for (path, _) in store.nodes() {
            let breadcrumb = store.breadcrumb(&path).unwrap();
            assert_eq!(breadcrumb.len(), path.len());

            for depth in 1..=path.len() {
                let prefix = &path[..depth];
                assert_eq!(
                    breadcrumb[depth - 1],
                    store.get_node(prefix).unwrap().name()
                );
            }
        }
    }

    #[test]
    fn test_is_selectable_agrees_with_leaf_status() {
        let store = marketplace();

        for (path, node) in store.nodes() {
            assert_eq!(store.is_selectable(&path), node.is_leaf(), "{path}");
            assert_eq!(node.is_leaf(), node.children().count() == 0, "{path}");
            assert_eq!(
                store.list_children(&path).unwrap().is_empty(),
                node.is_leaf(),
                "{path}"
            );
        }
    }

    #[test]
    fn test_queries_are_repeatable() {
        let store = marketplace();

        assert_eq!(store.get_node(&CITY_BUS), store.get_node(&CITY_BUS));
        assert_eq!(store.list_children(&["motors"]), store.list_children(&["motors"]));
        assert_eq!(store.is_selectable(&CITY_BUS), store.is_selectable(&CITY_BUS));
        assert_eq!(store.breadcrumb(&CITY_BUS), store.breadcrumb(&CITY_BUS));
    }

    #[test]
    fn test_select() {
        let store = marketplace();

        assert_eq!(store.select(&CITY_BUS).map(TaxonomyNode::name), Ok("City Bus"));
        assert_eq!(
            store.select(&["motors", "heavy-vehicles"]),
            Err(SelectCategoryError::NotSelectable {
                path: CategoryPath::from(["motors", "heavy-vehicles"])
            })
        );
        assert_eq!(
            store.select(&["motors", "bogus-key"]),
            Err(SelectCategoryError::NotFound(NotFound {
                path: CategoryPath::from(["motors", "bogus-key"])
            }))
        );
    }

    #[test]
    fn test_nodes_are_depth_first_in_definition_order() {
        let store = small_taxonomy();

        assert_eq!(
            store
                .nodes()
                .map(|(path, _)| path.to_string())
                .collect::<Vec<_>>(),
            vec![
                "motors",
                "motors/cars",
                "motors/parts",
                "motors/parts/tyres",
                "motors/parts/batteries",
                "jobs"
            ]
        );
        assert_eq!(store.len(), 6);
        assert_eq!(store.max_depth(), 3);
    }

    #[test]
    fn test_leaves() {
        let store = small_taxonomy();

        assert_eq!(
            store
                .leaves()
                .into_iter()
                .map(|(path, _)| path.to_string())
                .collect::<Vec<_>>(),
            vec![
                "motors/cars",
                "motors/parts/tyres",
                "motors/parts/batteries",
                "jobs"
            ]
        );
    }

    #[test]
    fn test_every_leaf_is_selectable() {
        let store = marketplace();

        for (path, _) in store.leaves() {
            assert!(store.is_selectable(&path), "{path}");
        }
    }

    #[test]
    fn test_find_by_key() {
        let store = marketplace();

        assert_eq!(
            store.find_by_key("city-bus"),
            vec![CategoryPath::from(CITY_BUS)]
        );
        assert_eq!(store.find_by_key("bogus-key"), Vec::<CategoryPath>::new());
        assert!(store.find_by_key("villas").len() > 1);
    }

    #[test]
    fn test_marketplace_depth() {
        assert_eq!(marketplace().max_depth(), 4);
    }
}
