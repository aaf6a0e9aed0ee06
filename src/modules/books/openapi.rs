use serde_json::{json, Value};

use super::models::{
    AUTHOR_MIN_CHARS, DESCRIPTION_MAX_CHARS, DESCRIPTION_MIN_CHARS, PUBLISHED_EXCLUSIVE_MAX,
    PUBLISHED_EXCLUSIVE_MIN, RATING_EXCLUSIVE_MAX, RATING_EXCLUSIVE_MIN, TITLE_MIN_CHARS,
};

fn json_content(schema: Value) -> Value {
    json!({ "application/json": { "schema": schema } })
}

fn book_list_response() -> Value {
    json!({
        "description": "Matching books in catalog order",
        "content": json_content(json!({
            "type": "array",
            "items": { "$ref": "#/components/schemas/Book" }
        }))
    })
}

fn message_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": json_content(json!({ "$ref": "#/components/schemas/Message" }))
    })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": json_content(json!({ "$ref": "#/components/schemas/ErrorResponse" }))
    })
}

fn book_id_parameter() -> Value {
    json!({
        "name": "book_id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64", "exclusiveMinimum": 0 }
    })
}

fn book_request_body() -> Value {
    json!({
        "required": true,
        "content": json_content(json!({ "$ref": "#/components/schemas/BookRequest" }))
    })
}

/// OpenAPI fragment describing every books route
pub fn fragment() -> Value {
    json!({
        "paths": {
            "/books": {
                "get": {
                    "summary": "List all books",
                    "tags": ["Books"],
                    "responses": { "200": book_list_response() }
                }
            },
            "/books/": {
                "get": {
                    "summary": "Books with an exact rating",
                    "tags": ["Books"],
                    "parameters": [{
                        "name": "book_rating",
                        "in": "query",
                        "required": true,
                        "schema": {
                            "type": "number",
                            "exclusiveMinimum": RATING_EXCLUSIVE_MIN,
                            "exclusiveMaximum": RATING_EXCLUSIVE_MAX
                        }
                    }],
                    "responses": {
                        "200": book_list_response(),
                        "422": error_response("Malformed rating")
                    }
                }
            },
            "/books/publish/": {
                "get": {
                    "summary": "Books published in a year",
                    "tags": ["Books"],
                    "parameters": [{
                        "name": "publish_date",
                        "in": "query",
                        "required": true,
                        "schema": {
                            "type": "integer",
                            "format": "int32",
                            "exclusiveMinimum": PUBLISHED_EXCLUSIVE_MIN,
                            "exclusiveMaximum": PUBLISHED_EXCLUSIVE_MAX
                        }
                    }],
                    "responses": {
                        "200": book_list_response(),
                        "422": error_response("Malformed year")
                    }
                }
            },
            "/books/{book_id}": {
                "get": {
                    "summary": "Get a book by id",
                    "tags": ["Books"],
                    "parameters": [book_id_parameter()],
                    "responses": {
                        "200": {
                            "description": "The book",
                            "content": json_content(json!({ "$ref": "#/components/schemas/Book" }))
                        },
                        "404": error_response("Book not found"),
                        "422": error_response("Malformed id")
                    }
                },
                "delete": {
                    "summary": "Delete a book by id",
                    "tags": ["Books"],
                    "parameters": [book_id_parameter()],
                    "responses": {
                        "200": message_response("Book deleted"),
                        "404": error_response("Book not found"),
                        "422": error_response("Malformed id")
                    }
                }
            },
            "/books/update_book": {
                "put": {
                    "summary": "Replace a book, identified by the id in the body",
                    "tags": ["Books"],
                    "requestBody": book_request_body(),
                    "responses": {
                        "200": message_response("Book updated"),
                        "404": error_response("Book not found"),
                        "422": error_response("Validation error")
                    }
                }
            },
            "/create-book": {
                "post": {
                    "summary": "Add a book; the id is assigned by the catalog",
                    "tags": ["Books"],
                    "requestBody": book_request_body(),
                    "responses": {
                        "201": message_response("Book added"),
                        "422": error_response("Validation error")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer", "format": "int64" },
                        "title": { "type": "string" },
                        "author": { "type": "string" },
                        "description": { "type": "string" },
                        "rating": { "type": "number", "format": "double" },
                        "published_date": { "type": "integer", "format": "int32" }
                    },
                    "required": ["id", "title", "author", "description", "rating", "published_date"]
                },
                "BookRequest": {
                    "type": "object",
                    "properties": {
                        "id": {
                            "type": "integer",
                            "format": "int64",
                            "description": "Ignored on create; identifies the target on update"
                        },
                        "title": { "type": "string", "minLength": TITLE_MIN_CHARS },
                        "author": { "type": "string", "minLength": AUTHOR_MIN_CHARS },
                        "description": {
                            "type": "string",
                            "minLength": DESCRIPTION_MIN_CHARS,
                            "maxLength": DESCRIPTION_MAX_CHARS
                        },
                        "rating": {
                            "type": "number",
                            "format": "double",
                            "exclusiveMinimum": RATING_EXCLUSIVE_MIN,
                            "exclusiveMaximum": RATING_EXCLUSIVE_MAX
                        },
                        "published_date": {
                            "type": "integer",
                            "format": "int32",
                            "exclusiveMinimum": PUBLISHED_EXCLUSIVE_MIN,
                            "exclusiveMaximum": PUBLISHED_EXCLUSIVE_MAX
                        }
                    },
                    "required": ["title", "author", "description", "rating", "published_date"]
                },
                "Message": {
                    "type": "object",
                    "properties": { "message": { "type": "string" } },
                    "required": ["message"]
                }
            }
        }
    })
}
