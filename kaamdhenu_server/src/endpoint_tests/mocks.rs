use kaamdhenu_engine::{
    capabilities::Role,
    db_types::{
        NewProduct,
        NewUser,
        NewUserInfo,
        Product,
        ProductUpdate,
        RoleAssignment,
        StockHistory,
        User,
        UserInfo,
        UserUpdate,
    },
    traits::{CatalogError, CatalogManagement, UserApiError, UserManagement},
};
use mockall::mock;

mock! {
    pub Catalog {}
    impl CatalogManagement for Catalog {
        async fn fetch_products<'a>(&self, district: Option<&'a str>) -> Result<Vec<Product>, CatalogError>;
        async fn fetch_product(&self, id: i64) -> Result<Option<Product>, CatalogError>;
        async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogError>;
        async fn update_product(&self, id: i64, update: ProductUpdate) -> Result<Option<Product>, CatalogError>;
        async fn delete_product(&self, id: i64) -> Result<bool, CatalogError>;
        async fn find_product(&self, name: &str, district: &str, unique_number: i64) -> Result<Option<Product>, CatalogError>;
        async fn deduct_stock(&self, product_id: i64, amount: i64) -> Result<Product, CatalogError>;
        async fn fetch_stock_history(&self, product_id: i64) -> Result<Vec<StockHistory>, CatalogError>;
    }
}

mock! {
    pub Users {}
    impl UserManagement for Users {
        async fn fetch_users(&self) -> Result<Vec<User>, UserApiError>;
        async fn fetch_user(&self, telegram_id: &str) -> Result<Option<User>, UserApiError>;
        async fn create_user(&self, user: NewUser) -> Result<User, UserApiError>;
        async fn update_user(&self, telegram_id: &str, update: UserUpdate) -> Result<Option<User>, UserApiError>;
        async fn fetch_roles(&self) -> Result<Vec<RoleAssignment>, UserApiError>;
        async fn fetch_user_roles(&self, telegram_id: &str) -> Result<Vec<RoleAssignment>, UserApiError>;
        async fn assign_role(&self, assignment: RoleAssignment) -> Result<RoleAssignment, UserApiError>;
        async fn remove_role(&self, telegram_id: &str, role: Role) -> Result<bool, UserApiError>;
        async fn fetch_user_info(&self, telegram_id: &str) -> Result<Option<UserInfo>, UserApiError>;
        async fn upsert_user_info(&self, info: NewUserInfo) -> Result<UserInfo, UserApiError>;
    }
}
