//! In-process repository implementation.
//!
//! Backs both repository traits with one shared store so that the category
//! foreign key on products is enforced the same way Postgres enforces it.
//! Used by the test suites and by the service when no `DATABASE_URL` is set.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::traits::{CategoryRepository, ProductRepository};
use crate::error::{PersistenceError, Result};
use catalog_domain::{
    Category, CategoryId, NewCategory, NewProduct, Product, ProductFilter, ProductId,
};

#[derive(Default)]
struct State {
    categories: BTreeMap<CategoryId, Category>,
    products: BTreeMap<ProductId, Product>,
    last_category_id: CategoryId,
    last_product_id: ProductId,
}

impl State {
    fn category_name(&self, id: CategoryId) -> Result<String> {
        self.categories
            .get(&id)
            .map(|category| category.name.clone())
            .ok_or_else(|| {
                PersistenceError::Conflict(format!("category {id} does not exist"))
            })
    }
}

/// Shared in-memory catalog store.
#[derive(Default)]
pub struct MemoryCatalog {
    state: RwLock<State>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for MemoryCatalog {
    async fn list(&self) -> Result<Vec<Category>> {
        let state = self.state.read().await;
        Ok(state.categories.values().cloned().collect())
    }

    async fn get_by_id(&self, id: CategoryId) -> Result<Option<Category>> {
        let state = self.state.read().await;
        Ok(state.categories.get(&id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Category>> {
        let state = self.state.read().await;
        Ok(state
            .categories
            .values()
            .find(|category| category.name == name)
            .cloned())
    }

    async fn create(&self, category: &NewCategory) -> Result<Category> {
        let mut state = self.state.write().await;
        state.last_category_id += 1;

        let created = Category {
            id: state.last_category_id,
            name: category.name.clone(),
            description: category.description.clone(),
        };
        state.categories.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, category: &Category) -> Result<Category> {
        let mut state = self.state.write().await;
        let stored = state
            .categories
            .get_mut(&category.id)
            .ok_or_else(|| PersistenceError::not_found("category", category.id))?;
        stored.clone_from(category);

        // Keep the denormalized names in step with the join Postgres performs.
        for product in state.products.values_mut() {
            if product.category_id == category.id {
                product.category_name.clone_from(&category.name);
            }
        }
        Ok(category.clone())
    }

    async fn delete(&self, id: CategoryId) -> Result<bool> {
        let mut state = self.state.write().await;
        if state.products.values().any(|product| product.category_id == id) {
            return Err(PersistenceError::Conflict(format!(
                "category {id} is still referenced by products"
            )));
        }
        Ok(state.categories.remove(&id).is_some())
    }
}

#[async_trait]
impl ProductRepository for MemoryCatalog {
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        let state = self.state.read().await;
        Ok(state
            .products
            .values()
            .filter(|product| filter.matches(product))
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.get(&id).cloned())
    }

    async fn create(&self, product: &NewProduct) -> Result<Product> {
        let mut state = self.state.write().await;
        let category_name = state.category_name(product.category_id)?;
        state.last_product_id += 1;

        let now = Utc::now();
        let created = Product {
            id: state.last_product_id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            category_id: product.category_id,
            category_name,
            created_at: now,
            updated_at: now,
        };
        state.products.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, product: &Product) -> Result<Product> {
        let mut state = self.state.write().await;
        let category_name = state.category_name(product.category_id)?;
        let stored = state
            .products
            .get_mut(&product.id)
            .ok_or_else(|| PersistenceError::not_found("product", product.id))?;

        stored.name.clone_from(&product.name);
        stored.description.clone_from(&product.description);
        stored.price = product.price;
        stored.category_id = product.category_id;
        stored.category_name = category_name;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: ProductId) -> Result<bool> {
        let mut state = self.state.write().await;
        Ok(state.products.remove(&id).is_some())
    }
}
