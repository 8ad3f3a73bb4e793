mod common;

use clientspec_api::{DynamicType, DynamicTypeId, HttpMethod, RequestValue};
use common::{visit_all, visit_one};

const USER_CONTROLLER: &str = r#"
package com.acme.web;

import org.springframework.http.ResponseEntity;
import org.springframework.web.bind.annotation.*;
import java.util.List;

@RestController
@RequestMapping("/api/users")
public class UserController {

    @GetMapping
    public List<User> list(@RequestParam(value = "page", required = false) Integer page,
                           @RequestParam(defaultValue = "20") int size) {
        return null;
    }

    @GetMapping("/{id}")
    public ResponseEntity<User> get(@PathVariable("id") Long userId) {
        return null;
    }

    @PostMapping(path = "/", consumes = "application/json")
    public User create(@RequestBody User user) {
        return user;
    }

    @RequestMapping(value = "/{id}", method = RequestMethod.PUT)
    public void update(@PathVariable long id, @RequestBody(required = false) User user) {
    }

    @DeleteMapping("{id}")
    public void delete(@PathVariable(name = "id") String id) {
    }

    private void helper() {
    }
}
"#;

#[test]
fn test_handlers_in_source_order() {
    let visit = visit_one(USER_CONTROLLER);
    assert_eq!(visit.service.name, "UserController");
    assert!(visit.skipped.is_empty());

    let names: Vec<_> = visit
        .service
        .endpoints
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["list", "get", "create", "update", "delete"]);
}

#[test]
fn test_paths_and_methods() {
    let visit = visit_one(USER_CONTROLLER);
    let routes: Vec<_> = visit
        .service
        .endpoints
        .iter()
        .map(|e| (e.method, e.endpoint.as_str()))
        .collect();
    assert_eq!(
        routes,
        vec![
            (HttpMethod::Get, "/api/users"),
            (HttpMethod::Get, "/api/users/{{id}}"),
            (HttpMethod::Post, "/api/users/"),
            (HttpMethod::Put, "/api/users/{{id}}"),
            (HttpMethod::Delete, "/api/users/{{id}}"),
        ]
    );
}

#[test]
fn test_query_variables() {
    let visit = visit_one(USER_CONTROLLER);
    let list = visit.service.endpoint("list").unwrap();

    let keys: Vec<_> = list.query_variables.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["page", "size"]);
    assert_eq!(
        list.query_variables["page"],
        RequestValue::new(DynamicType::primitive(DynamicTypeId::Integer), false)
    );
    assert!(!list.query_variables["size"].required);
    assert!(list.path_variables.is_empty());
    assert_eq!(
        list.response_body,
        RequestValue::new(DynamicType::array(DynamicType::user("User")), true)
    );
}

#[test]
fn test_path_variable_naming() {
    let visit = visit_one(USER_CONTROLLER);

    let get = visit.service.endpoint("get").unwrap();
    assert_eq!(get.path_variables.keys().collect::<Vec<_>>(), vec!["id"]);
    assert!(get.path_variables["id"].required);
    assert_eq!(
        get.response_body.value_type,
        DynamicType::generic("ResponseEntity", vec![DynamicType::user("User")])
    );

    let update = visit.service.endpoint("update").unwrap();
    assert_eq!(
        update.path_variables["id"].value_type,
        DynamicType::primitive(DynamicTypeId::Integer)
    );

    let delete = visit.service.endpoint("delete").unwrap();
    assert_eq!(
        delete.path_variables["id"].value_type,
        DynamicType::primitive(DynamicTypeId::String)
    );
}

#[test]
fn test_request_and_response_bodies() {
    let visit = visit_one(USER_CONTROLLER);

    let create = visit.service.endpoint("create").unwrap();
    assert_eq!(
        create.request_body,
        RequestValue::new(DynamicType::user("User"), true)
    );

    let update = visit.service.endpoint("update").unwrap();
    assert_eq!(
        update.request_body,
        RequestValue::new(DynamicType::user("User"), false)
    );
    assert_eq!(
        update.response_body,
        RequestValue::new(DynamicType::void(), true)
    );

    let list = visit.service.endpoint("list").unwrap();
    assert_eq!(
        list.request_body,
        RequestValue::new(DynamicType::void(), false)
    );
}

#[test]
fn test_request_mapping_without_method_is_skipped() {
    let visit = visit_one(
        r#"
@RestController
public class LegacyController {
    @RequestMapping("/legacy")
    public String legacy() { return ""; }

    @GetMapping("/ok")
    public String ok() { return ""; }
}
"#,
    );

    assert_eq!(visit.service.endpoints.len(), 1);
    assert_eq!(visit.service.endpoints[0].name, "ok");
    assert_eq!(visit.skipped.len(), 1);
    assert_eq!(visit.skipped[0].handler, "LegacyController.legacy");
}

#[test]
fn test_class_level_path_attribute() {
    let visit = visit_one(
        r#"
@RestController
@RequestMapping(path = "/v2/", produces = "application/json")
class OrdersController {
    @GetMapping(path = "/orders")
    Order[] all() { return null; }

    @PatchMapping(value = {"", "/ignored"})
    void touch() { }
}
"#,
    );

    let all = visit.service.endpoint("all").unwrap();
    assert_eq!(all.endpoint, "/v2/orders");
    assert_eq!(
        all.response_body.value_type,
        DynamicType::array(DynamicType::user("Order"))
    );

    let touch = visit.service.endpoint("touch").unwrap();
    assert_eq!(touch.method, HttpMethod::Patch);
    assert_eq!(touch.endpoint, "/v2/ignored");
}

#[test]
fn test_controller_without_class_mapping() {
    let visit = visit_one(
        r#"
@org.springframework.web.bind.annotation.RestController
public class PingController {
    @GetMapping("ping")
    public String ping() { return "pong"; }
}
"#,
    );
    assert_eq!(visit.service.endpoints[0].endpoint, "ping");
}

#[test]
fn test_non_controllers_are_ignored() {
    let visits = visit_all(&[
        (
            "Service.java",
            r#"
@Service
public class UserService {
    @GetMapping("/not-a-handler")
    public String x() { return ""; }
}
"#,
        ),
        (
            "Api.java",
            r#"
@RestController
public interface UserApi {
    @GetMapping("/users")
    String users();
}
"#,
        ),
    ]);
    assert!(visits.is_empty());
}

#[test]
fn test_paths_built_from_constants() {
    let visits = visit_all(&[
        (
            "Routes.java",
            r#"
package com.acme;

public final class Routes {
    public static final String API = "/api";
    public static final String ITEMS = API + "/items";
}
"#,
        ),
        (
            "ItemController.java",
            r#"
package com.acme;

@RestController
@RequestMapping(Routes.ITEMS)
public class ItemController {
    private static final String BY_ID = "/{itemId}";

    @GetMapping(BY_ID)
    public Item get(@PathVariable String itemId) { return null; }

    @GetMapping(Routes.MISSING)
    public Item broken() { return null; }
}
"#,
        ),
    ]);

    assert_eq!(visits.len(), 1);
    let visit = &visits[0];
    assert_eq!(
        visit.service.endpoint("get").unwrap().endpoint,
        "/api/items/{{itemId}}"
    );
    assert_eq!(visit.skipped.len(), 1);
    assert_eq!(visit.skipped[0].handler, "ItemController.broken");
}

#[test]
fn test_generic_handlers_use_bounds() {
    let visit = visit_one(
        r#"
@RestController
public class EchoController<T extends Payload> {
    @PostMapping("/echo")
    public T echo(@RequestBody T body) { return body; }

    @PostMapping("/batch")
    public <R> List<R> batch(@RequestBody Set<? extends Payload> items, @RequestParam String... tags) {
        return null;
    }
}
"#,
    );

    let echo = visit.service.endpoint("echo").unwrap();
    assert_eq!(echo.request_body.value_type, DynamicType::user("Payload"));
    assert_eq!(echo.response_body.value_type, DynamicType::user("Payload"));

    let batch = visit.service.endpoint("batch").unwrap();
    assert_eq!(
        batch.response_body.value_type,
        DynamicType::array(DynamicType::any())
    );
    assert_eq!(
        batch.request_body.value_type,
        DynamicType::array(DynamicType::any())
    );
    assert_eq!(
        batch.query_variables["tags"].value_type,
        DynamicType::array(DynamicType::primitive(DynamicTypeId::String))
    );
}

#[test]
fn test_document_json_shape() {
    let visit = visit_one(
        r#"
@RestController
public class ShapeController {
    @GetMapping("/shape/{id}")
    public Shape get(@PathVariable int id) { return null; }
}
"#,
    );
    let json = serde_json::to_value(&visit.service).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "ShapeController",
            "endpoints": [{
                "name": "get",
                "endpoint": "/shape/{{id}}",
                "method": "GET",
                "pathVariables": {
                    "id": {
                        "type": { "typeID": "INTEGER", "reference": null, "nested": null },
                        "required": true
                    }
                },
                "queryVariables": {},
                "requestBody": {
                    "type": { "typeID": "VOID", "reference": null, "nested": null },
                    "required": false
                },
                "responseBody": {
                    "type": { "typeID": "USER", "reference": "Shape", "nested": [] },
                    "required": true
                }
            }]
        })
    );
}

#[test]
fn test_same_named_controllers_keep_their_own_constants() {
    let visits = visit_all(&[
        (
            "v1/UserController.java",
            r#"
package com.acme.v1;

@RestController
@RequestMapping(UserController.BASE)
public class UserController {
    static final String BASE = "/v1/users";

    @GetMapping
    public String list() { return ""; }
}
"#,
        ),
        (
            "v2/UserController.java",
            r#"
package com.acme.v2;

@RestController
@RequestMapping(BASE)
public class UserController {
    static final String BASE = "/v2/users";

    @GetMapping
    public String list() { return ""; }
}
"#,
        ),
    ]);
    let paths: Vec<_> = visits
        .iter()
        .map(|v| v.service.endpoints[0].endpoint.as_str())
        .collect();
    assert_eq!(paths, vec!["/v1/users", "/v2/users"]);
}
