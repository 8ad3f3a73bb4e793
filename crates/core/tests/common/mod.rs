use std::path::Path;

/// Writes `files` (relative path, content) under `root`, creating directories.
pub fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
}

#[allow(dead_code)]
pub const USER_CONTROLLER: &str = r#"
package com.acme.web;

import com.acme.model.User;
import org.springframework.web.bind.annotation.*;
import java.util.List;

@RestController
@RequestMapping(Routes.USERS)
public class UserController {
    @GetMapping
    public List<User> list(@RequestParam(required = false) String q) { return null; }

    @GetMapping("/{id}")
    public User get(@PathVariable long id) { return null; }

    @PostMapping
    public User create(@RequestBody User user) { return user; }

    @RequestMapping("/legacy")
    public void legacy() { }
}
"#;

#[allow(dead_code)]
pub const ROUTES: &str = r#"
package com.acme.web;

public interface Routes {
    String API = "/api";
    String USERS = API + "/users";
}
"#;

#[allow(dead_code)]
pub const USER: &str = r#"
package com.acme.model;

import com.fasterxml.jackson.annotation.JsonIgnore;

public class User {
    private long id;
    @NotNull
    private String email;
    private Address address;
    private Status status;
    @JsonIgnore
    private String password;
    private static final long serialVersionUID = 1L;

    public enum Status { ACTIVE, LOCKED }
}
"#;

#[allow(dead_code)]
pub const ADDRESS: &str = r#"
package com.acme.model;

public record Address(String street, @JsonProperty("zip_code") String zip, int number) {}
"#;

#[allow(dead_code)]
pub fn write_sample_project(root: &Path) {
    write_files(
        root,
        &[
            ("src/main/java/com/acme/web/UserController.java", USER_CONTROLLER),
            ("src/main/java/com/acme/web/Routes.java", ROUTES),
            ("src/main/java/com/acme/model/User.java", USER),
            ("src/main/java/com/acme/model/Address.java", ADDRESS),
        ],
    );
}
