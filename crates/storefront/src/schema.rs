//! Collection and field names of the record store.
//!
//! The store assigns custom columns a `_c` suffix; these names are part of
//! the wire contract and must match the deployed schema exactly. Every
//! domain-relevant field is listed in its collection's `PROJECTION` - the
//! store returns only what is asked for, so an omitted field is absent from
//! the result.

/// Store-assigned primary key column, shared by every collection.
pub const ID: &str = "Id";

/// The `product_c` collection.
pub mod product {
    pub const COLLECTION: &str = "product_c";

    pub const NAME: &str = "name_c";
    pub const CATEGORY: &str = "category_c";
    pub const SUBCATEGORY: &str = "subcategory_c";
    pub const PRICE: &str = "price_c";
    pub const IMAGES: &str = "images_c";
    pub const SIZES: &str = "sizes_c";
    pub const COLORS: &str = "colors_c";
    pub const DESCRIPTION: &str = "description_c";
    pub const IN_STOCK: &str = "in_stock_c";
    pub const STOCK_COUNT: &str = "stock_count_c";
    pub const FEATURED: &str = "featured_c";
    pub const TRENDING: &str = "trending_c";

    pub const PROJECTION: [&str; 13] = [
        super::ID,
        NAME,
        CATEGORY,
        SUBCATEGORY,
        PRICE,
        IMAGES,
        SIZES,
        COLORS,
        DESCRIPTION,
        IN_STOCK,
        STOCK_COUNT,
        FEATURED,
        TRENDING,
    ];
}

/// The `order_c` collection.
pub mod order {
    pub const COLLECTION: &str = "order_c";

    pub const USER_ID: &str = "user_id_c";
    pub const ORDER_NUMBER: &str = "order_number_c";
    pub const ITEMS: &str = "items_c";
    pub const SUBTOTAL: &str = "subtotal_c";
    pub const SHIPPING: &str = "shipping_c";
    pub const TAX: &str = "tax_c";
    pub const TOTAL: &str = "total_c";
    pub const SHIPPING_ADDRESS: &str = "shipping_address_c";
    pub const STATUS: &str = "status_c";
    pub const CREATED_AT: &str = "created_at_c";

    pub const PROJECTION: [&str; 11] = [
        super::ID,
        USER_ID,
        ORDER_NUMBER,
        ITEMS,
        SUBTOTAL,
        SHIPPING,
        TAX,
        TOTAL,
        SHIPPING_ADDRESS,
        STATUS,
        CREATED_AT,
    ];
}

/// The `user_c` collection.
pub mod user {
    pub const COLLECTION: &str = "user_c";

    pub const EMAIL: &str = "email_c";
    pub const FIRST_NAME: &str = "first_name_c";
    pub const LAST_NAME: &str = "last_name_c";
    pub const PHONE: &str = "phone_c";
    pub const CREATED_AT: &str = "created_at_c";

    pub const PROJECTION: [&str; 6] =
        [super::ID, EMAIL, FIRST_NAME, LAST_NAME, PHONE, CREATED_AT];
}

/// The `address_c` collection.
pub mod address {
    pub const COLLECTION: &str = "address_c";

    pub const USER_ID: &str = "user_id_c";
    pub const FIRST_NAME: &str = "first_name_c";
    pub const LAST_NAME: &str = "last_name_c";
    pub const STREET: &str = "address_c";
    pub const CITY: &str = "city_c";
    pub const STATE: &str = "state_c";
    pub const ZIP_CODE: &str = "zip_code_c";
    pub const COUNTRY: &str = "country_c";
    pub const IS_DEFAULT: &str = "is_default_c";

    pub const PROJECTION: [&str; 9] = [
        super::ID,
        FIRST_NAME,
        LAST_NAME,
        STREET,
        CITY,
        STATE,
        ZIP_CODE,
        COUNTRY,
        IS_DEFAULT,
    ];
}
