use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        addresses::{AddressList, AddressRequest, UpdateAddressRequest},
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        favorite_pizzas::{FavoritePizzaList, FavoritePizzaRequest, UpdateFavoritePizzaRequest},
        orders::{
            CreateOrderRequest, OrderAddressRequest, OrderList, OrderMiscRequest,
            OrderPizzaRequest, OrderWithItems,
        },
    },
    models::{
        Address, Dough, FavoritePizza, FavoritePizzaDetails, Ingredient, IngredientQuantity, Misc,
        Order, OrderMisc, OrderPizza, Sauce, Size, User,
    },
    response::{ApiResponse, CountData, Meta},
    routes::{addresses, auth, catalog, favorite_pizzas, health, orders, params},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::current_user,
        catalog::list_dough,
        catalog::list_sizes,
        catalog::list_sauces,
        catalog::list_ingredients,
        catalog::list_misc,
        favorite_pizzas::list_favorite_pizzas,
        favorite_pizzas::count_favorite_pizzas,
        favorite_pizzas::create_favorite_pizza,
        favorite_pizzas::get_favorite_pizza,
        favorite_pizzas::update_favorite_pizza,
        favorite_pizzas::replace_favorite_pizza,
        favorite_pizzas::delete_favorite_pizza,
        addresses::list_addresses,
        addresses::count_addresses,
        addresses::create_address,
        addresses::get_address,
        addresses::update_address,
        addresses::replace_address,
        addresses::delete_address,
        orders::list_orders,
        orders::create_order,
        orders::get_order,
        orders::delete_order
    ),
    components(
        schemas(
            User,
            Dough,
            Size,
            Sauce,
            Ingredient,
            Misc,
            IngredientQuantity,
            FavoritePizza,
            FavoritePizzaDetails,
            Address,
            Order,
            OrderPizza,
            OrderMisc,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            FavoritePizzaRequest,
            UpdateFavoritePizzaRequest,
            FavoritePizzaList,
            AddressRequest,
            UpdateAddressRequest,
            AddressList,
            CreateOrderRequest,
            OrderPizzaRequest,
            OrderMiscRequest,
            OrderAddressRequest,
            OrderWithItems,
            OrderList,
            CountData,
            params::Pagination,
            params::SortOrder,
            params::FavoritePizzaQuery,
            params::AddressQuery,
            params::OrderListQuery,
            Meta,
            ApiResponse<FavoritePizzaList>,
            ApiResponse<AddressList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and current user"),
        (name = "Catalog", description = "Dough, sizes, sauces, ingredients and misc products"),
        (name = "Favorite pizzas", description = "Caller-owned saved pizza configurations"),
        (name = "Addresses", description = "Caller-owned delivery addresses"),
        (name = "Orders", description = "Caller-owned orders priced on the server"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
